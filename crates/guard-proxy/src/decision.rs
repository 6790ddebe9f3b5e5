//! Collapses a guard service payload into a single decision.
//!
//! The service's response shape is not contractually fixed; different API
//! versions expose different field names. Normalization is an ordered list
//! of independent rules evaluated first-match-wins, biased toward the
//! stricter decision when signals conflict.

use guard_protocol::Decision;
use serde_json::Value;

/// Whether a true violation flag beats a softer explicit decision field.
/// Older schema versions put `action: "allow"` next to populated violation
/// arrays; strict-wins is the documented precedence here.
pub const VIOLATIONS_OVERRIDE_EXPLICIT: bool = true;

/// Categorical arrays the guard service has used across API versions.
const VIOLATION_ARRAYS: &[&str] = &[
    "harmful_content",
    "prompt_attack",
    "prompt_attacks",
    "sensitive_info",
    "sensitive_content",
    "sensitive_information",
    "pii",
];

/// Attributes that mark an array entry as a violation.
const VIOLATION_FLAGS: &[&str] = &["content_violation", "violation", "leakage"];

/// Fields that may carry a direct decision, in lookup order.
const EXPLICIT_FIELDS: &[&str] = &["decision", "action", "recommendation"];

/// Phrases observed in free-text `reason` strings when structured fields
/// are absent.
const REASON_PHRASES: &[&str] = &[
    "harmful content detected",
    "sensitive information detected",
    "prompt attack detected",
];

type Rule = fn(&Value) -> Option<Decision>;

const STRICT_FIRST: &[Rule] = &[violation_scan, explicit_field, reason_fallback];
const EXPLICIT_FIRST: &[Rule] = &[explicit_field, violation_scan, reason_fallback];

/// Total over arbitrary JSON; never panics. Anything unrecognized is `allow`.
pub fn normalize(payload: &Value) -> Decision {
    if !payload.is_object() {
        return Decision::Allow;
    }
    let rules = if VIOLATIONS_OVERRIDE_EXPLICIT {
        STRICT_FIRST
    } else {
        EXPLICIT_FIRST
    };
    rules
        .iter()
        .find_map(|rule| rule(payload))
        .unwrap_or(Decision::Allow)
}

/// Any entry in any known categorical array flagged true forces `block`.
fn violation_scan(payload: &Value) -> Option<Decision> {
    let hit = VIOLATION_ARRAYS
        .iter()
        .filter_map(|key| payload.get(key))
        .any(any_violation);
    hit.then_some(Decision::Block)
}

fn any_violation(items: &Value) -> bool {
    let Some(items) = items.as_array() else {
        return false;
    };
    items.iter().any(|item| {
        VIOLATION_FLAGS
            .iter()
            .any(|flag| item.get(flag).and_then(Value::as_bool) == Some(true))
    })
}

/// A direct decision field with a recognized value is used verbatim;
/// `flag`/`warn` are synonyms for `review`.
fn explicit_field(payload: &Value) -> Option<Decision> {
    for field in EXPLICIT_FIELDS {
        let Some(value) = payload.get(*field).and_then(Value::as_str) else {
            continue;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => return Some(Decision::Allow),
            "block" | "deny" => return Some(Decision::Block),
            "review" | "flag" | "warn" => return Some(Decision::Review),
            _ => {}
        }
    }
    None
}

/// Last resort: pattern-match the human-readable reason string.
fn reason_fallback(payload: &Value) -> Option<Decision> {
    let reason = payload
        .get("reason")
        .and_then(Value::as_str)
        .map(str::to_ascii_lowercase)?;
    REASON_PHRASES
        .iter()
        .any(|phrase| reason.contains(phrase))
        .then_some(Decision::Block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_block_field_wins() {
        assert_eq!(normalize(&json!({"action": "block"})), Decision::Block);
        assert_eq!(normalize(&json!({"decision": "Block"})), Decision::Block);
        assert_eq!(
            normalize(&json!({"recommendation": "deny"})),
            Decision::Block
        );
    }

    #[test]
    fn explicit_review_synonyms_map_to_review() {
        assert_eq!(normalize(&json!({"action": "review"})), Decision::Review);
        assert_eq!(normalize(&json!({"action": "flag"})), Decision::Review);
        assert_eq!(normalize(&json!({"action": "warn"})), Decision::Review);
    }

    #[test]
    fn violation_entry_forces_block_over_explicit_allow() {
        let payload = json!({
            "action": "allow",
            "harmful_content": [{"content_violation": true, "category": "violence"}],
        });
        assert_eq!(normalize(&payload), Decision::Block);
    }

    #[test]
    fn all_violation_array_variants_are_scanned() {
        for key in [
            "harmful_content",
            "prompt_attack",
            "prompt_attacks",
            "sensitive_info",
            "sensitive_content",
            "sensitive_information",
            "pii",
        ] {
            let payload = json!({ key: [{"violation": true}] });
            assert_eq!(normalize(&payload), Decision::Block, "array {key}");
        }
    }

    #[test]
    fn leakage_flag_counts_as_violation() {
        let payload = json!({"pii": [{"leakage": true}]});
        assert_eq!(normalize(&payload), Decision::Block);
    }

    #[test]
    fn false_flags_do_not_block() {
        let payload = json!({
            "harmful_content": [{"content_violation": false}],
            "pii": [{"leakage": false}],
        });
        assert_eq!(normalize(&payload), Decision::Allow);
    }

    #[test]
    fn non_boolean_flags_are_ignored() {
        let payload = json!({"harmful_content": [{"violation": "true"}]});
        assert_eq!(normalize(&payload), Decision::Allow);
    }

    #[test]
    fn reason_phrase_blocks_when_nothing_structured_matches() {
        let payload = json!({"reason": "Harmful Content Detected in prompt"});
        assert_eq!(normalize(&payload), Decision::Block);
    }

    #[test]
    fn explicit_allow_beats_reason_phrase() {
        // First match wins: a recognized explicit field stops evaluation
        // before the free-text fallback.
        let payload = json!({"action": "allow", "reason": "prompt attack detected"});
        assert_eq!(normalize(&payload), Decision::Allow);
    }

    #[test]
    fn unrecognized_payloads_default_to_allow() {
        assert_eq!(normalize(&json!({})), Decision::Allow);
        assert_eq!(normalize(&json!({"score": 0.2})), Decision::Allow);
        assert_eq!(normalize(&json!({"action": "observe"})), Decision::Allow);
        assert_eq!(normalize(&json!(null)), Decision::Allow);
        assert_eq!(normalize(&json!("block")), Decision::Allow);
        assert_eq!(normalize(&json!([1, 2, 3])), Decision::Allow);
    }
}
