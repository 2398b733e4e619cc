//! Field-by-field repair of model output against a template.
//!
//! Every field of the result is decided on its own: the model's value is
//! kept when it has the right shape, otherwise the template value for the
//! profile's title is used. Nothing here can fail.

use serde_json::Value;
use tracing::debug;

use profilegraph_shared::{
    Attribute, AttributeLevel, KnowledgeGraph, ProfileInput, Tier, TieredList,
    types::{MIN_EDUCATION_CHARS, PAIN_POINTS_PER_TIER, TOOLS_PER_TIER},
};

use crate::templates::select_template;

/// Raw-output key for tools.
pub const TOOLS_KEY: &str = "Tools Used";
/// Raw-output key for pain points.
pub const PAIN_POINTS_KEY: &str = "Biggest Pain Points";
/// Raw-output key for the attribute map.
pub const ATTRIBUTES_KEY: &str = "Attribute Ranges";
/// Raw-output key for the education paragraph.
pub const EDUCATION_KEY: &str = "Education Level & Learning Approach";

/// A tiered section of the output.
struct ListSection {
    key: &'static str,
    cap: usize,
    list: fn(&mut KnowledgeGraph) -> &mut TieredList,
}

fn tools(graph: &mut KnowledgeGraph) -> &mut TieredList {
    &mut graph.tools_used
}

fn pain_points(graph: &mut KnowledgeGraph) -> &mut TieredList {
    &mut graph.biggest_pain_points
}

const LIST_SECTIONS: [ListSection; 2] = [
    ListSection {
        key: TOOLS_KEY,
        cap: TOOLS_PER_TIER,
        list: tools,
    },
    ListSection {
        key: PAIN_POINTS_KEY,
        cap: PAIN_POINTS_PER_TIER,
        list: pain_points,
    },
];

/// Merge `raw` over the template for `profile.title`.
pub fn reconcile(raw: &Value, profile: &ProfileInput) -> KnowledgeGraph {
    let mut graph = select_template(&profile.title);
    let mut defaulted = 0usize;

    for section in &LIST_SECTIONS {
        for tier in Tier::ALL {
            let items = raw
                .get(section.key)
                .and_then(|s| s.get(tier.label()))
                .and_then(Value::as_array);
            match items {
                Some(items) => (section.list)(&mut graph).set(tier, list_items(items, section.cap)),
                None => defaulted += 1,
            }
        }
    }

    let attributes = raw.get(ATTRIBUTES_KEY);
    for attr in Attribute::ALL {
        match attributes.and_then(|map| level_for(map, attr)) {
            Some(level) => graph.attribute_ranges.set(attr, level),
            None => defaulted += 1,
        }
    }

    match raw
        .get(EDUCATION_KEY)
        .and_then(Value::as_str)
        .filter(|text| text.chars().count() >= MIN_EDUCATION_CHARS)
    {
        Some(text) => graph.education_level_and_learning = text.to_string(),
        None => defaulted += 1,
    }

    debug!(defaulted, "reconciled model output");
    graph
}

/// First `cap` items as text. Nulls and nested structures are skipped.
fn list_items(items: &[Value], cap: usize) -> Vec<String> {
    items
        .iter()
        .take(cap)
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn level_for(map: &Value, attr: Attribute) -> Option<AttributeLevel> {
    std::iter::once(attr.label())
        .chain(attr.aliases().iter().copied())
        .find_map(|key| map.get(key).and_then(Value::as_str).and_then(AttributeLevel::from_exact))
}
