/*!
 * API Integration Tests
 * Wire payloads through decode, context build, evaluation, and response
 */

use access_engine::engine::ComplexRuleEngine;
use access_engine::policy::Policy;
use access_engine::{build_context, decode_request, EvaluateResponse};
use pretty_assertions::assert_eq;
use serde_json::json;
use time::macros::datetime;

const FALLBACK: time::OffsetDateTime = datetime!(2025-06-15 08:00:00 UTC);

fn stored_policy() -> Policy {
    serde_json::from_value(json!({
        "resourceId": "marketing_digital_avanzado",
        "isEnabled": true,
        "mainLogicOperator": "OR",
        "ruleGroups": [{
            "id": "g-grace",
            "name": "Grace period",
            "logicOperator": "OR",
            "priority": 0,
            "rules": [{
                "id": "r-grace",
                "name": "Recently deactivated premium",
                "logicOperator": "AND",
                "accessLevel": "READ",
                "conditions": [
                    {
                        "id": "c-recent",
                        "fieldPath": "user.deactivation_date",
                        "operator": "WITHIN_LAST",
                        "value": "365_days"
                    },
                    {
                        "id": "c-premium",
                        "fieldPath": "user.services",
                        "operator": "CONTAINS",
                        "value": "marketing_digital_premium"
                    }
                ]
            }]
        }]
    }))
    .unwrap()
}

#[test]
fn test_simulated_evaluation_round_trip() {
    let payload = json!({
        "resourceId": "marketing_digital_avanzado",
        "user": {
            "id": "u_1",
            "email": "ana@example.com",
            "role": "student",
            "groups": [],
            "tags": [],
            "services": ["marketing_digital_premium"],
            "status": "inactive",
            "deactivation_date": "2024-08-01"
        },
        "simulatedDate": "2025-02-01"
    })
    .to_string();

    let request = decode_request(&payload).unwrap();
    let ctx = build_context(&request, FALLBACK).unwrap();
    let policy = stored_policy();

    let result = ComplexRuleEngine::new().evaluate(&request.resource_id, &ctx, Some(&policy));
    let body = serde_json::to_value(EvaluateResponse::from_result(result)).unwrap();

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["allowed"], json!(true));
    assert_eq!(body["result"]["accessLevel"], json!("READ"));
    assert_eq!(body["result"]["evaluationStrategy"], json!("COMPLEX"));
    assert_eq!(body["result"]["mainOperator"], json!("OR"));
    assert!(body["result"]["executionTimeMs"].is_number());

    let groups = body["result"]["groupResults"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    let conditions = groups[0]["ruleResults"][0]["conditionResults"]
        .as_array()
        .unwrap();
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0]["result"], json!(true));
    assert_eq!(conditions[1]["result"], json!(true));

    let trace = body["result"]["evaluationTrace"].as_array().unwrap();
    assert!(!trace.is_empty());
}

#[test]
fn test_not_configured_response_is_null_not_denied() {
    let request = decode_request(r#"{"resourceId": "marketing_digital_avanzado"}"#).unwrap();
    let ctx = build_context(&request, FALLBACK).unwrap();
    let disabled = stored_policy().disabled();

    let result = ComplexRuleEngine::new().evaluate(&request.resource_id, &ctx, Some(&disabled));
    let body = serde_json::to_value(EvaluateResponse::from_result(result)).unwrap();

    assert_eq!(body, json!({"success": true, "result": null}));
}

#[test]
fn test_anonymous_request_is_denied_not_rejected() {
    // no user in the payload: subject paths resolve to nothing and fail
    let request = decode_request(r#"{"resourceId": "marketing_digital_avanzado"}"#).unwrap();
    let ctx = build_context(&request, FALLBACK).unwrap();

    let result = ComplexRuleEngine::new()
        .evaluate(&request.resource_id, &ctx, Some(&stored_policy()))
        .unwrap();
    assert!(!result.allowed);
    assert_eq!(result.access_level, None);
}

#[test]
fn test_unknown_operator_survives_decode_and_fails_closed() {
    let policy: Policy = serde_json::from_value(json!({
        "resourceId": "r",
        "isEnabled": true,
        "mainLogicOperator": "AND",
        "ruleGroups": [{
            "id": "g1", "name": "G", "logicOperator": "AND", "priority": 0,
            "rules": [{
                "id": "r1", "name": "R", "logicOperator": "AND", "accessLevel": "FULL",
                "conditions": [{
                    "id": "c1", "fieldPath": "user.id",
                    "operator": "FUZZY_MATCH", "value": "u"
                }]
            }]
        }]
    }))
    .unwrap();

    let request = decode_request(r#"{"resourceId": "r", "user": {"id": "u_1"}}"#).unwrap();
    let ctx = build_context(&request, FALLBACK).unwrap();
    let result = ComplexRuleEngine::new()
        .evaluate("r", &ctx, Some(&policy))
        .unwrap();
    assert!(!result.allowed);
}
