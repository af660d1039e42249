//! Catalogue of civic issue categories.

use serde::Serialize;

/// An issue category a report can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub issue_types: &'static [&'static str],
}

pub static CATEGORIES: &[Category] = &[
    Category {
        id: "road",
        name: "Road & Transportation",
        description: "Potholes, damaged roads, broken footpaths, and public transport issues",
        issue_types: &[
            "Pothole",
            "Damaged Road",
            "Broken Footpath",
            "Bus Stop Issues",
            "Parking Problems",
        ],
    },
    Category {
        id: "water",
        name: "Water Supply & Drainage",
        description: "Water shortage, contamination, leakage, and drainage blockages",
        issue_types: &[
            "Water Shortage",
            "Water Contamination",
            "Pipe Leakage",
            "Drainage Blockage",
            "Sewage Overflow",
        ],
    },
    Category {
        id: "electricity",
        name: "Electricity & Streetlights",
        description: "Power outages, faulty streetlights, and electrical hazards",
        issue_types: &[
            "Power Outage",
            "Faulty Streetlight",
            "Exposed Wires",
            "Transformer Issues",
            "Meter Problems",
        ],
    },
    Category {
        id: "sanitation",
        name: "Sanitation & Waste",
        description: "Garbage collection, waste dumping, and cleanliness issues",
        issue_types: &[
            "Garbage Not Collected",
            "Illegal Dumping",
            "Overflowing Bins",
            "Street Cleaning",
            "Dead Animal Removal",
        ],
    },
    Category {
        id: "safety",
        name: "Public Safety & Crime",
        description: "Safety concerns, suspicious activities, and crime reporting",
        issue_types: &[
            "Suspicious Activity",
            "Street Crime",
            "Vandalism",
            "Harassment",
            "Unsafe Areas",
        ],
    },
    Category {
        id: "traffic",
        name: "Traffic & Signals",
        description: "Traffic congestion, signal malfunctions, and road safety",
        issue_types: &[
            "Signal Malfunction",
            "Traffic Congestion",
            "Missing Signs",
            "Road Marking Issues",
            "Zebra Crossing",
        ],
    },
    Category {
        id: "parks",
        name: "Parks & Public Spaces",
        description: "Maintenance of parks, playgrounds, and community areas",
        issue_types: &[
            "Park Maintenance",
            "Playground Safety",
            "Bench Damage",
            "Fence Repair",
            "Landscaping Issues",
        ],
    },
    Category {
        id: "government",
        name: "Government Offices",
        description: "Issues with government office services and facilities",
        issue_types: &[
            "Long Wait Times",
            "Poor Service",
            "Facility Issues",
            "Document Problems",
            "Staff Behavior",
        ],
    },
    Category {
        id: "toilets",
        name: "Public Toilets & Hygiene",
        description: "Public toilet maintenance and hygiene concerns",
        issue_types: &[
            "Toilet Not Working",
            "No Water Supply",
            "Unhygienic Conditions",
            "Missing Facilities",
            "Accessibility Issues",
        ],
    },
    Category {
        id: "environment",
        name: "Environmental Issues",
        description: "Pollution, illegal tree cutting, and water body concerns",
        issue_types: &[
            "Air Pollution",
            "Noise Pollution",
            "Illegal Tree Cutting",
            "Water Body Pollution",
            "Burning Waste",
        ],
    },
    Category {
        id: "animal",
        name: "Animal Welfare",
        description: "Stray animals, animal cruelty, and wildlife concerns",
        issue_types: &[
            "Stray Dogs",
            "Animal Cruelty",
            "Dead Animals",
            "Wildlife Issues",
            "Pet Abandonment",
        ],
    },
    Category {
        id: "other",
        name: "Other Issues",
        description: "Issues not covered by other categories",
        issue_types: &[
            "General Complaint",
            "Suggestion",
            "Information Request",
            "Other",
        ],
    },
];

/// Look up a category by id.
pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}
