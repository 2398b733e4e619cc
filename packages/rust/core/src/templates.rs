//! Static knowledge-graph templates keyed on the job title.
//!
//! Used as the whole answer when no completion endpoint is available, and as
//! the per-field default when model output is unusable.

use profilegraph_shared::{AttributeLevel, AttributeRanges, KnowledgeGraph, TieredList};

use AttributeLevel::{High, Low, Medium};

/// Role bucket a title falls into. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    ProductManager,
    Engineer,
    Sales,
    Generic,
}

impl RoleCategory {
    /// Resolve a free-text title. Case-insensitive substring match; first rule wins.
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("product manager") {
            Self::ProductManager
        } else if title.contains("software engineer") || title.contains("developer") {
            Self::Engineer
        } else if title.contains("sales") {
            Self::Sales
        } else {
            Self::Generic
        }
    }

    /// The complete template for this category.
    pub fn template(&self) -> KnowledgeGraph {
        match self {
            Self::ProductManager => product_manager(),
            Self::Engineer => engineer(),
            Self::Sales => sales(),
            Self::Generic => generic(),
        }
    }
}

/// Template for a job title.
pub fn select_template(title: &str) -> KnowledgeGraph {
    RoleCategory::from_title(title).template()
}

/// Attribute levels in [`profilegraph_shared::Attribute::ALL`] order.
fn ranges(levels: [AttributeLevel; 15]) -> AttributeRanges {
    let [
        pattern_recognition,
        associative_memory,
        emotional_influence,
        heuristic_processing,
        parallel_processing,
        implicit_learning,
        reflexive_responses,
        cognitive_biases,
        logical_reasoning,
        abstract_thinking,
        deliberative_decision_making,
        sequential_processing,
        cognitive_control,
        goal_oriented_planning,
        meta_cognition,
    ] = levels;

    AttributeRanges {
        pattern_recognition,
        associative_memory,
        emotional_influence,
        heuristic_processing,
        parallel_processing,
        implicit_learning,
        reflexive_responses,
        cognitive_biases,
        logical_reasoning,
        abstract_thinking,
        deliberative_decision_making,
        sequential_processing,
        cognitive_control,
        goal_oriented_planning,
        meta_cognition,
    }
}

fn product_manager() -> KnowledgeGraph {
    KnowledgeGraph {
        tools_used: TieredList::from_slices(
            &["JIRA", "Confluence", "Figma", "Google Analytics", "Slack"],
            &["Amplitude", "Trello", "Asana", "Miro", "Notion"],
            &["Productboard", "Pendo", "Hotjar", "Optimizely", "FullStory"],
        ),
        biggest_pain_points: TieredList::from_slices(
            &[
                "Balancing stakeholder needs and expectations",
                "Prioritizing features with limited resources",
                "Getting accurate customer feedback",
            ],
            &[
                "Aligning engineering and design teams",
                "Meeting tight deadlines",
                "Managing technical debt",
            ],
            &[
                "Defining clear success metrics",
                "Handling changing market conditions",
                "Maintaining product documentation",
            ],
        ),
        attribute_ranges: ranges([
            High, Medium, High, High, High, Medium, Medium, Medium, High, High, High, Medium,
            High, High, High,
        ]),
        education_level_and_learning: "Bachelor's or Master's degree in Business, Computer \
            Science, or related field. Continuous learning through industry events, product \
            communities, and online courses."
            .into(),
    }
}

fn engineer() -> KnowledgeGraph {
    KnowledgeGraph {
        tools_used: TieredList::from_slices(
            &["Git", "VS Code", "Stack Overflow", "JIRA", "Docker"],
            &["Jenkins", "Kubernetes", "Postman", "Figma", "Slack"],
            &["TypeScript", "GraphQL", "MongoDB", "Redis", "Terraform"],
        ),
        biggest_pain_points: TieredList::from_slices(
            &[
                "Debugging complex issues",
                "Meeting project deadlines",
                "Technical debt management",
            ],
            &[
                "Unclear requirements",
                "Balancing new features vs. maintenance",
                "Context switching between projects",
            ],
            &[
                "Knowledge sharing across teams",
                "Keeping up with new technologies",
                "Documentation maintenance",
            ],
        ),
        attribute_ranges: ranges([
            High, Medium, Low, High, Medium, Medium, Low, Medium, High, High, Medium, High, High,
            Medium, High,
        ]),
        education_level_and_learning: "Bachelor's or Master's degree in Computer Science, \
            Software Engineering, or related field. Continuous learning through documentation, \
            Stack Overflow, GitHub, technical blogs, and online courses."
            .into(),
    }
}

fn sales() -> KnowledgeGraph {
    KnowledgeGraph {
        tools_used: TieredList::from_slices(
            &["Salesforce", "LinkedIn Sales Navigator", "Outreach", "ZoomInfo", "Slack"],
            &["HubSpot", "Gong", "Calendly", "DocuSign", "Zoom"],
            &["Salesloft", "6sense", "Clearbit", "Pandadoc", "Chorus.ai"],
        ),
        biggest_pain_points: TieredList::from_slices(
            &[
                "Meeting sales quotas",
                "Lead quality and quantity",
                "Long sales cycles",
            ],
            &[
                "CRM data management",
                "Competitive differentiation",
                "Internal communication barriers",
            ],
            &[
                "Product knowledge gaps",
                "Price negotiation constraints",
                "Post-sales handoff problems",
            ],
        ),
        attribute_ranges: ranges([
            Medium, High, High, High, Medium, High, High, Medium, Medium, Medium, Medium, Low,
            Medium, High, Medium,
        ]),
        education_level_and_learning: "Bachelor's degree in Business, Marketing, or related \
            field. Learning through sales training programs, industry events, and competitor \
            research."
            .into(),
    }
}

fn generic() -> KnowledgeGraph {
    KnowledgeGraph {
        tools_used: TieredList::from_slices(
            &["Microsoft Office Suite", "Slack", "Zoom", "Google Workspace", "LinkedIn"],
            &["Asana", "Trello", "Notion", "Teams", "Salesforce"],
            &["Tableau", "PowerBI", "Airtable", "Monday.com", "Miro"],
        ),
        biggest_pain_points: TieredList::from_slices(
            &["Work-life balance", "Communication challenges", "Time management"],
            &["Information overload", "Meeting efficiency", "Remote collaboration"],
            &["Career development", "Tool fragmentation", "Process inefficiencies"],
        ),
        attribute_ranges: AttributeRanges::uniform(Medium),
        education_level_and_learning:
            "Bachelor's degree with continuous professional development".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilegraph_shared::{Attribute, Tier};

    const ALL_CATEGORIES: [RoleCategory; 4] = [
        RoleCategory::ProductManager,
        RoleCategory::Engineer,
        RoleCategory::Sales,
        RoleCategory::Generic,
    ];

    #[test]
    fn every_template_is_complete_and_capped() {
        for category in ALL_CATEGORIES {
            let graph = category.template();
            assert!(graph.within_caps(), "{category:?} exceeds a tier cap");
            for tier in Tier::ALL {
                assert!(!graph.tools_used.get(tier).is_empty(), "{category:?} {tier:?} tools");
                assert!(!graph.biggest_pain_points.get(tier).is_empty());
            }
            assert!(graph.education_level_and_learning.chars().count() >= 11);
        }
    }

    #[test]
    fn priority_order() {
        assert_eq!(
            RoleCategory::from_title("Product Manager, Sales Tools"),
            RoleCategory::ProductManager
        );
        assert_eq!(RoleCategory::from_title("Sales Developer"), RoleCategory::Engineer);
        assert_eq!(
            RoleCategory::from_title("Senior Software Engineer"),
            RoleCategory::Engineer
        );
        assert_eq!(RoleCategory::from_title("VP of SALES"), RoleCategory::Sales);
        assert_eq!(RoleCategory::from_title("Nurse"), RoleCategory::Generic);
        assert_eq!(RoleCategory::from_title(""), RoleCategory::Generic);
    }

    #[test]
    fn product_manager_template_contents() {
        let graph = select_template("Senior Product Manager");
        assert_eq!(
            graph.tools_used.high_probability,
            vec!["JIRA", "Confluence", "Figma", "Google Analytics", "Slack"]
        );
        assert_eq!(graph.attribute_ranges.pattern_recognition, High);
        assert_eq!(graph.attribute_ranges.associative_memory, Medium);
        assert_eq!(graph.attribute_ranges.sequential_processing, Medium);
    }

    #[test]
    fn engineer_template_levels() {
        let ranges = select_template("Backend Developer").attribute_ranges;
        assert_eq!(ranges.get(Attribute::EmotionalInfluence), Low);
        assert_eq!(ranges.get(Attribute::ReflexiveResponses), Low);
        assert_eq!(ranges.get(Attribute::SequentialProcessing), High);
        assert_eq!(ranges.get(Attribute::GoalOrientedPlanning), Medium);
    }

    #[test]
    fn sales_template_levels() {
        let ranges = select_template("Sales Director").attribute_ranges;
        assert_eq!(ranges.get(Attribute::PatternRecognition), Medium);
        assert_eq!(ranges.get(Attribute::SequentialProcessing), Low);
        assert_eq!(ranges.get(Attribute::GoalOrientedPlanning), High);
    }

    #[test]
    fn generic_template_is_all_medium() {
        let graph = select_template("Chef");
        for attr in Attribute::ALL {
            assert_eq!(graph.attribute_ranges.get(attr), Medium);
        }
        assert_eq!(
            graph.education_level_and_learning,
            "Bachelor's degree with continuous professional development"
        );
    }
}
