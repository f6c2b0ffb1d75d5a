//! Topic and message suggestions per focus area

use super::fields::{FocusArea, GENERAL_MESSAGE, GENERAL_TOPIC};
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub topic: &'static str,
    pub message: &'static str,
}

lazy_static! {
    static ref SUGGESTIONS: HashMap<FocusArea, Suggestion> = {
        let mut map = HashMap::new();
        map.insert(FocusArea::Defence, Suggestion {
            topic: "Defense budget optimization and compliance requirements",
            message: "Strategic RMIS implementation for defense contractors and military organizations",
        });
        map.insert(FocusArea::Healthcare, Suggestion {
            topic: "Patient safety and regulatory compliance challenges",
            message: "Healthcare risk management solutions for improved patient outcomes",
        });
        map.insert(FocusArea::Financial, Suggestion {
            topic: "Regulatory compliance and operational risk management",
            message: "Financial services risk management for regulatory excellence",
        });
        map.insert(FocusArea::Manufacturing, Suggestion {
            topic: "Supply chain risk and operational safety management",
            message: "Manufacturing risk management for operational excellence",
        });
        map.insert(FocusArea::General, Suggestion {
            topic: GENERAL_TOPIC,
            message: GENERAL_MESSAGE,
        });
        map
    };
}

pub fn suggestion_for(area: FocusArea) -> Suggestion {
    SUGGESTIONS[&area]
}

/// A field may be overwritten only while empty or still holding the general pre-fill.
pub fn is_replaceable(current: &str, general: &str) -> bool {
    current.is_empty() || current == general
}
