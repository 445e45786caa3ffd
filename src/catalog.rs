//! Reference catalog of contracting risks and default modalities.
//!
//! The catalog is advisory: analysts may register risks under any name, and
//! reports list the aspects below when a risk's name matches an entry.

use serde::Serialize;

/// Strategies offered in a freshly initialised register.
pub const DEFAULT_MODALITIES: [&str; 6] = [
    "Swap for an already-built property",
    "Swap for a building to be built (third-party land)",
    "Swap for construction works (federal land)",
    "Build to Suit (federal land)",
    "Contracting with payment in kind",
    "Conventional public works",
];

/// A predefined risk and the aspects to weigh when scoring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub impact_aspects: &'static [&'static str],
    pub likelihood_aspects: &'static [&'static str],
}

const OCCUPIED_BUILDING: [&str; 3] = [
    "Safety and upkeep of the building currently used by the agency",
    "Rental cost of the building currently used by the agency",
    "Occupancy rate of the building currently used by the agency",
];

pub static RISK_CATALOG: [CatalogEntry; 8] = [
    CatalogEntry {
        name: "Delivery deadline missed",
        impact_aspects: &[
            OCCUPIED_BUILDING[0],
            OCCUPIED_BUILDING[1],
            OCCUPIED_BUILDING[2],
            "Continuity of public services",
            "Additional costs from contract extensions",
        ],
        likelihood_aspects: &[
            "Monitoring structure and contractual sanction mechanisms",
            "Technical complexity and external risks (permits, weather, logistics)",
            "Maturity of the supplied designs",
            "Characteristics of the construction site",
            "Contractor's track record on deadlines",
            "Technical and financial capacity of the contractor",
        ],
    },
    CatalogEntry {
        name: "Public properties unavailable for construction or swap",
        impact_aspects: &[
            "Number of available properties and how encumbered they are",
            "Effect on the economic viability of the operation",
            "Need for additional budget resources",
            "Setback to the public estate optimisation strategy",
        ],
        likelihood_aspects: &[
            "Number of available properties and how encumbered they are",
            "Pending lawsuits over the properties",
            "Registry and documentation status of the properties",
            "Interest of other public bodies in the same properties",
            "Complexity of the decommissioning procedures",
        ],
    },
    CatalogEntry {
        name: "Unfavourable market conditions",
        impact_aspects: &[
            OCCUPIED_BUILDING[0],
            OCCUPIED_BUILDING[1],
            OCCUPIED_BUILDING[2],
            "Reduced competition in the tender",
            "Higher operation costs",
        ],
        likelihood_aspects: &[
            "Required investment (property value x balance x construction)",
            "Attractiveness of the lots offered (value, permitted uses, market trends)",
            "Degree of investor specialisation required",
            "Market heat x interest rates x expected return",
            "Expressions of interest or public consultations held",
            "Participation in similar past tenders",
            "National and sector economic outlook",
        ],
    },
    CatalogEntry {
        name: "Works abandoned by the contractor",
        impact_aspects: &[
            OCCUPIED_BUILDING[0],
            OCCUPIED_BUILDING[1],
            OCCUPIED_BUILDING[2],
            "Cost of a new tender and of resuming the works",
            "Significant delay in delivering the project",
        ],
        likelihood_aspects: &[
            "Technical and financial requirements in the selection process",
            "Contractual guarantees and other safeguards to be required",
            "Contractual guarantees and other safeguards in the model",
            "Share of the new building to be occupied by the administration",
            "Financial position and history of the contractor",
            "Robustness of execution monitoring",
        ],
    },
    CatalogEntry {
        name: "Low return on the property portfolio",
        impact_aspects: &[
            "Value of the properties swapped against the value of the property acquired",
            "Appreciation potential of the properties swapped",
            "Contribution of the operation to reducing idle properties",
            "Financial loss to the federal estate",
            "Reduced efficiency of estate management",
        ],
        likelihood_aspects: &[
            "Contribution of the operation to reducing idle properties",
            "Fit between the proposed use and the property",
            "Potential expense savings (asset management plan efficiency)",
            "Efficiency of the post-swap asset management plan",
            "Market demand and likelihood of appreciation",
            "Location and characteristics of the properties offered",
            "Disposal or economic exploitation strategy",
        ],
    },
    CatalogEntry {
        name: "Insufficient budget allocation",
        impact_aspects: &[
            OCCUPIED_BUILDING[0],
            OCCUPIED_BUILDING[1],
            OCCUPIED_BUILDING[2],
            "Share of the operation funded from the budget",
            "Project becoming entirely unviable",
            "Need to renegotiate the contract",
        ],
        likelihood_aspects: &[
            "Weight of the expense against the investment allocation",
            "Annual and multi-year budget law figures",
            "Agency's history of spending freezes",
            "Political weight of the beneficiary bodies",
            "Federal fiscal and budget outlook",
            "Priority of the project in government planning",
        ],
    },
    CatalogEntry {
        name: "Legal challenge",
        impact_aspects: &[
            "Full or partial halt of the project",
            "Additional legal defence costs",
            "Loss of institutional credibility",
            "Need to redesign the contracting model",
            "Continuity of public services",
        ],
        likelihood_aspects: &[
            "Complexity and novelty of the legal model adopted",
            "Case law on similar modalities",
            "Strength of the legal basis for the contract",
            "Challenges raised against similar projects",
            "Involvement of external audit bodies",
            "Transparency and adherence to public administration principles",
            "Quality of the procurement's legal documentation",
        ],
    },
    CatalogEntry {
        name: "Poor quality of delivered services",
        impact_aspects: &[
            "Additional cost of repairs and adjustments",
            "End-user dissatisfaction",
            "Shorter service life of the building",
            "Need for a new contract to fix defects",
            "Damage to the institution's image",
            "Effect on operational functionality",
        ],
        likelihood_aspects: &[
            "Rigour of the technical qualification criteria",
            "Technical inspection and oversight structure",
            "Technical specifications and quality standards defined",
            "Contractor's quality track record",
            "Contractual quality guarantees",
            "Technical complexity of the services required",
            "Fit between contract price and expected quality",
        ],
    },
];

/// Look up a catalog entry by exact name (surrounding whitespace ignored).
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    let name = name.trim();
    RISK_CATALOG.iter().find(|entry| entry.name == name)
}
