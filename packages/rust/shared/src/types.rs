//! Core domain types: the profile a caller submits and the knowledge graph we return.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileGraphError, Result};

/// Maximum entries per tier in [`KnowledgeGraph::tools_used`].
pub const TOOLS_PER_TIER: usize = 5;

/// Maximum entries per tier in [`KnowledgeGraph::biggest_pain_points`].
pub const PAIN_POINTS_PER_TIER: usize = 4;

/// Shortest education text accepted from a model.
pub const MIN_EDUCATION_CHARS: usize = 11;

// ---------------------------------------------------------------------------
// ProfileInput
// ---------------------------------------------------------------------------

/// A professional profile submitted for knowledge-graph generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_context: Vec<String>,
}

impl ProfileInput {
    /// Reject profiles missing any of title, location, or company.
    pub fn validate(&self) -> Result<()> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.title) || blank(&self.location) || blank(&self.company) {
            return Err(ProfileGraphError::validation(
                "Please provide title, location, and company",
            ));
        }
        if self.age == Some(0) {
            return Err(ProfileGraphError::validation("age must be a positive integer"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Confidence bucket for tools and pain points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    /// Key used for this tier in model output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High Probability",
            Self::Medium => "Medium Probability",
            Self::Low => "Low Probability",
        }
    }
}

/// Three ordered lists keyed by [`Tier`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredList {
    pub high_probability: Vec<String>,
    pub medium_probability: Vec<String>,
    pub low_probability: Vec<String>,
}

impl TieredList {
    /// Build from string slices, mostly for the static templates.
    pub fn from_slices(high: &[&str], medium: &[&str], low: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            high_probability: owned(high),
            medium_probability: owned(medium),
            low_probability: owned(low),
        }
    }

    pub fn get(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::High => &self.high_probability,
            Tier::Medium => &self.medium_probability,
            Tier::Low => &self.low_probability,
        }
    }

    pub fn set(&mut self, tier: Tier, items: Vec<String>) {
        match tier {
            Tier::High => self.high_probability = items,
            Tier::Medium => self.medium_probability = items,
            Tier::Low => self.low_probability = items,
        }
    }

    /// True if no tier holds more than `cap` entries.
    pub fn within_cap(&self, cap: usize) -> bool {
        Tier::ALL.iter().all(|t| self.get(*t).len() <= cap)
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Rating for a cognitive attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeLevel {
    Low,
    Medium,
    High,
}

impl AttributeLevel {
    /// Parse one of exactly `Low`, `Medium`, `High` (case-sensitive).
    pub fn from_exact(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// The fixed set of fifteen cognitive attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    PatternRecognition,
    AssociativeMemory,
    EmotionalInfluence,
    HeuristicProcessing,
    ParallelProcessing,
    ImplicitLearning,
    ReflexiveResponses,
    CognitiveBiases,
    LogicalReasoning,
    AbstractThinking,
    DeliberativeDecisionMaking,
    SequentialProcessing,
    CognitiveControl,
    GoalOrientedPlanning,
    MetaCognition,
}

impl Attribute {
    pub const ALL: [Attribute; 15] = [
        Attribute::PatternRecognition,
        Attribute::AssociativeMemory,
        Attribute::EmotionalInfluence,
        Attribute::HeuristicProcessing,
        Attribute::ParallelProcessing,
        Attribute::ImplicitLearning,
        Attribute::ReflexiveResponses,
        Attribute::CognitiveBiases,
        Attribute::LogicalReasoning,
        Attribute::AbstractThinking,
        Attribute::DeliberativeDecisionMaking,
        Attribute::SequentialProcessing,
        Attribute::CognitiveControl,
        Attribute::GoalOrientedPlanning,
        Attribute::MetaCognition,
    ];

    /// Human-readable label, as used in prompts and model output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PatternRecognition => "Pattern Recognition",
            Self::AssociativeMemory => "Associative Memory",
            Self::EmotionalInfluence => "Emotional Influence",
            Self::HeuristicProcessing => "Heuristic Processing",
            Self::ParallelProcessing => "Parallel Processing",
            Self::ImplicitLearning => "Implicit Learning",
            Self::ReflexiveResponses => "Reflexive Responses",
            Self::CognitiveBiases => "Cognitive Biases",
            Self::LogicalReasoning => "Logical Reasoning",
            Self::AbstractThinking => "Abstract Thinking",
            Self::DeliberativeDecisionMaking => "Deliberative Decision-Making",
            Self::SequentialProcessing => "Sequential Processing",
            Self::CognitiveControl => "Cognitive Control (Inhibition)",
            Self::GoalOrientedPlanning => "Goal-Oriented Planning",
            Self::MetaCognition => "Meta-Cognition",
        }
    }

    /// Other keys a model may use for this attribute.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::CognitiveControl => &["Cognitive Control"],
            _ => &[],
        }
    }
}

/// A level for every [`Attribute`]; one field each, so the key set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRanges {
    pub pattern_recognition: AttributeLevel,
    pub associative_memory: AttributeLevel,
    pub emotional_influence: AttributeLevel,
    pub heuristic_processing: AttributeLevel,
    pub parallel_processing: AttributeLevel,
    pub implicit_learning: AttributeLevel,
    pub reflexive_responses: AttributeLevel,
    pub cognitive_biases: AttributeLevel,
    pub logical_reasoning: AttributeLevel,
    pub abstract_thinking: AttributeLevel,
    pub deliberative_decision_making: AttributeLevel,
    pub sequential_processing: AttributeLevel,
    pub cognitive_control: AttributeLevel,
    pub goal_oriented_planning: AttributeLevel,
    pub meta_cognition: AttributeLevel,
}

impl AttributeRanges {
    /// Every attribute at the same level.
    pub fn uniform(level: AttributeLevel) -> Self {
        Self {
            pattern_recognition: level,
            associative_memory: level,
            emotional_influence: level,
            heuristic_processing: level,
            parallel_processing: level,
            implicit_learning: level,
            reflexive_responses: level,
            cognitive_biases: level,
            logical_reasoning: level,
            abstract_thinking: level,
            deliberative_decision_making: level,
            sequential_processing: level,
            cognitive_control: level,
            goal_oriented_planning: level,
            meta_cognition: level,
        }
    }

    fn slot_mut(&mut self, attr: Attribute) -> &mut AttributeLevel {
        match attr {
            Attribute::PatternRecognition => &mut self.pattern_recognition,
            Attribute::AssociativeMemory => &mut self.associative_memory,
            Attribute::EmotionalInfluence => &mut self.emotional_influence,
            Attribute::HeuristicProcessing => &mut self.heuristic_processing,
            Attribute::ParallelProcessing => &mut self.parallel_processing,
            Attribute::ImplicitLearning => &mut self.implicit_learning,
            Attribute::ReflexiveResponses => &mut self.reflexive_responses,
            Attribute::CognitiveBiases => &mut self.cognitive_biases,
            Attribute::LogicalReasoning => &mut self.logical_reasoning,
            Attribute::AbstractThinking => &mut self.abstract_thinking,
            Attribute::DeliberativeDecisionMaking => &mut self.deliberative_decision_making,
            Attribute::SequentialProcessing => &mut self.sequential_processing,
            Attribute::CognitiveControl => &mut self.cognitive_control,
            Attribute::GoalOrientedPlanning => &mut self.goal_oriented_planning,
            Attribute::MetaCognition => &mut self.meta_cognition,
        }
    }

    pub fn get(&self, attr: Attribute) -> AttributeLevel {
        match attr {
            Attribute::PatternRecognition => self.pattern_recognition,
            Attribute::AssociativeMemory => self.associative_memory,
            Attribute::EmotionalInfluence => self.emotional_influence,
            Attribute::HeuristicProcessing => self.heuristic_processing,
            Attribute::ParallelProcessing => self.parallel_processing,
            Attribute::ImplicitLearning => self.implicit_learning,
            Attribute::ReflexiveResponses => self.reflexive_responses,
            Attribute::CognitiveBiases => self.cognitive_biases,
            Attribute::LogicalReasoning => self.logical_reasoning,
            Attribute::AbstractThinking => self.abstract_thinking,
            Attribute::DeliberativeDecisionMaking => self.deliberative_decision_making,
            Attribute::SequentialProcessing => self.sequential_processing,
            Attribute::CognitiveControl => self.cognitive_control,
            Attribute::GoalOrientedPlanning => self.goal_oriented_planning,
            Attribute::MetaCognition => self.meta_cognition,
        }
    }

    pub fn set(&mut self, attr: Attribute, level: AttributeLevel) {
        *self.slot_mut(attr) = level;
    }
}

// ---------------------------------------------------------------------------
// KnowledgeGraph
// ---------------------------------------------------------------------------

/// The generated knowledge graph for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGraph {
    pub tools_used: TieredList,
    pub biggest_pain_points: TieredList,
    pub attribute_ranges: AttributeRanges,
    pub education_level_and_learning: String,
}

impl KnowledgeGraph {
    /// True if every tier respects its cap.
    pub fn within_caps(&self) -> bool {
        self.tools_used.within_cap(TOOLS_PER_TIER)
            && self.biggest_pain_points.within_cap(PAIN_POINTS_PER_TIER)
    }
}
