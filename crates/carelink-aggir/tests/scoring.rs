use carelink_aggir::parser::{self, SkipReason};
use carelink_aggir::{
    Engine, Evaluation, Item, Rating, Response, RuleGroup, ScoringConfig, evaluate,
    score_document,
};
use carelink_core::models::evaluation::EvaluationDocument;
use serde_json::{Value, json};

fn answers(value: bool) -> Value {
    json!([
        { "Question": "S", "Reponse": value },
        { "Question": "T", "Reponse": value },
        { "Question": "C", "Reponse": value },
        { "Question": "H", "Reponse": value }
    ])
}

fn composite(code: &str, subs: &[&str], value: bool) -> Value {
    let subs: Vec<Value> = subs
        .iter()
        .map(|c| json!({ "Code": c, "Resultat": null, "AggirAdverbes": answers(value) }))
        .collect();
    json!({ "Code": code, "Resultat": null, "AggirSousVariable": subs })
}

fn simple(code: &str, value: bool) -> Value {
    json!({ "Code": code, "Resultat": null, "AggirAdverbes": answers(value) })
}

/// A stored document with every discriminant variable answered `value`.
fn document(value: bool) -> Value {
    json!({
        "aggir": {
            "GIR": null,
            "dateValidation": null,
            "AggirVariable": [
                composite("COHERENCE", &["COMMUNICATION", "COMPORTEMENT"], value),
                composite("ORIENTATION", &["TEMPS", "ESPACE"], value),
                composite("TOILETTE", &["TOILETTE_HAUT", "TOILETTE_BAS"], value),
                composite("HABILLAGE", &["HABILLAGE_HAUT", "HABILLAGE_MOYEN", "HABILLAGE_BAS"], value),
                composite("ALIMENTATION", &["SE_SERVIR", "MANGER"], value),
                composite("ELIMINATION", &["URINAIRE", "FECALE"], value),
                simple("TRANSFERTS", value),
                simple("DEPLACEMENT_INTERIEUR", value),
                simple("DEPLACEMENT_EXTERIEUR", value),
                simple("ALERTER", value),
                simple("CUISINE", value)
            ]
        }
    })
}

#[test]
fn full_autonomy_everywhere_is_gir_6_via_h() {
    let doc = EvaluationDocument::from_value(document(true)).unwrap();
    assert!(parser::is_complete(&doc));

    let result = score_document(&Engine::default(), &doc).unwrap();
    assert_eq!(result.level.get(), 6);
    assert_eq!(result.terminating_group, RuleGroup::H);
    assert_eq!(result.rank, 13);
    assert_eq!(result.score_per_group.len(), 8);
    assert!(result.score_per_group.values().all(|s| *s == 0));
    assert!(result.rating_per_item.values().all(|r| *r == Rating::Full));
    assert_eq!(result.rating_per_item.len(), 10);
    assert_eq!(result.rating_per_subitem.len(), 13);
}

#[test]
fn no_autonomy_everywhere_is_gir_1_at_a() {
    let doc = EvaluationDocument::from_value(document(false)).unwrap();
    let result = score_document(&Engine::default(), &doc).unwrap();

    assert_eq!(result.level.get(), 1);
    assert_eq!(result.terminating_group, RuleGroup::A);
    assert_eq!(result.score, 4440);
    assert_eq!(result.score_per_group.len(), 1);
    assert_eq!(result.algorithm_version, "1997-04-28");
}

#[test]
fn misspelled_code_is_skipped_and_defaults_to_partial() {
    let mut raw = document(true);
    raw["aggir"]["AggirVariable"][6]["Code"] = json!("TRANSFERT");
    let doc = EvaluationDocument::from_value(raw).unwrap();

    let report = parser::parse_with_report(&doc);
    assert!(report.evaluation.get(Item::Transfers).is_none());
    assert_eq!(report.evaluation.len(), 16);
    let reasons: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.code.as_deref(), s.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (Some("TRANSFERT"), SkipReason::UnknownCode),
            (Some("CUISINE"), SkipReason::UnknownCode),
        ]
    );
    assert!(!parser::is_complete(&doc));

    // transfers counted as B: H score 2000 -> GIR 5
    let result = score_document(&Engine::default(), &doc).unwrap();
    assert!(!result.rating_per_item.contains_key(&Item::Transfers));
    assert_eq!(result.terminating_group, RuleGroup::H);
    assert_eq!(result.score, 2000);
    assert_eq!(result.level.get(), 5);

    let strict = score_document(&Engine::new(ScoringConfig::strict()), &doc);
    assert!(strict.is_err());
}

#[test]
fn scoring_is_idempotent() {
    let evaluation = parser::parse_value(document(false)).unwrap();
    assert_eq!(evaluate(&evaluation), evaluate(&evaluation));
}

#[test]
fn eating_with_one_c_forces_c_but_washing_does_not() {
    let mut evaluation = Evaluation::uniform(Response::uniform(true));
    evaluation.insert(Item::Feeding, Response::uniform(false));
    evaluation.insert(Item::WashingLower, Response::uniform(false));

    let result = evaluate(&evaluation);
    assert_eq!(result.rating_per_item[&Item::Eating], Rating::NoAutonomy);
    assert_eq!(result.rating_per_item[&Item::Washing], Rating::Partial);
    assert_eq!(result.rating_per_subitem[&Item::Feeding], Rating::NoAutonomy);
}

#[test]
fn hemiplegic_profile_reaches_gir_2_in_group_c() {
    // Coherent and oriented, but needs help with transfers and cannot move
    // around indoors alone.
    let mut evaluation = Evaluation::uniform(Response::uniform(true));
    for item in [
        Item::WashingUpper,
        Item::WashingLower,
        Item::DressingUpper,
        Item::DressingMiddle,
        Item::DressingLower,
    ] {
        evaluation.insert(item, Response::new(true, false, true, true));
    }
    evaluation.insert(Item::Transfers, Response::uniform(false));
    evaluation.insert(Item::IndoorMobility, Response::uniform(false));

    // C: washing 16 + dressing 16 + transfers 1000 + indoor 400 = 1432
    let result = evaluate(&evaluation);
    assert_eq!(result.terminating_group, RuleGroup::C);
    assert_eq!(result.score, 1432);
    assert_eq!(result.rank, 6);
    assert_eq!(result.level.get(), 2);
}

#[test]
fn apply_result_writes_gir_and_letters_back() {
    let mut doc = EvaluationDocument::from_value(document(false)).unwrap();
    let result = score_document(&Engine::default(), &doc).unwrap();
    parser::apply_result(&mut doc, &result, jiff::Timestamp::UNIX_EPOCH);

    let value = doc.to_value().unwrap();
    let grid = &value["aggir"];
    assert_eq!(grid["GIR"], 1);
    assert_eq!(grid["groupeAlgorithme"], "A");
    assert_eq!(grid["scoreAlgorithme"], 4440);
    assert_eq!(grid["dateCalcul"], "1970-01-01T00:00:00Z");
    assert_eq!(grid["AggirVariable"][0]["Resultat"], "C");
    assert_eq!(grid["AggirVariable"][0]["AggirSousVariable"][1]["Resultat"], "C");
    assert_eq!(grid["AggirVariable"][6]["Resultat"], "C");
    // illustrative activities are left alone
    assert_eq!(grid["AggirVariable"][10]["Resultat"], Value::Null);

    // the written document still scores the same
    assert_eq!(score_document(&Engine::default(), &doc).unwrap(), result);
}

#[test]
fn result_serializes_with_letters_and_group_names() {
    let result = evaluate(&Evaluation::uniform(Response::uniform(true)));
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["level"], 6);
    assert_eq!(value["terminating_group"], "H");
    assert_eq!(value["score_per_group"]["A"], 0);
    assert_eq!(value["rating_per_item"]["INDOOR_MOBILITY"], "A");
    assert_eq!(value["rating_per_subitem"]["SELF_SERVICE"], "A");

    let read_back: carelink_aggir::ScoringResult = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(read_back, result);

    let mut tampered = value;
    tampered["level"] = json!(9);
    assert!(serde_json::from_value::<carelink_aggir::ScoringResult>(tampered).is_err());
}

#[test]
fn null_lists_skip_only_their_own_node() {
    let value = json!({
        "aggir": {
            "AggirVariable": [
                simple("TRANSFERTS", false),
                { "Code": "ALERTER", "Resultat": null, "AggirAdverbes": null },
                { "Code": "TOILETTE", "Resultat": null, "AggirSousVariable": null },
                {
                    "Code": "ALIMENTATION",
                    "AggirSousVariable": [
                        { "Code": "SE_SERVIR", "AggirAdverbes": [
                            { "Question": "S", "Reponse": 1 },
                            { "Question": "T", "Reponse": 1 },
                            { "Question": "C", "Reponse": 0 },
                            { "Question": "H", "Reponse": 1 }
                        ] },
                        { "Code": "MANGER", "AggirAdverbes": null }
                    ]
                }
            ]
        }
    });

    let evaluation = parser::parse_value(value.clone()).unwrap();
    assert_eq!(evaluation.len(), 2);
    assert_eq!(evaluation.get(Item::Transfers), Some(&Response::uniform(false)));
    assert_eq!(
        evaluation.get(Item::SelfService),
        Some(&Response::new(true, true, false, true))
    );

    let doc = EvaluationDocument::from_value(value).unwrap();
    let report = parser::parse_with_report(&doc);
    let reasons: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.code.as_deref(), s.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (Some("ALERTER"), SkipReason::IncompleteAnswers),
            (Some("TOILETTE"), SkipReason::NotALeaf),
            (Some("MANGER"), SkipReason::IncompleteAnswers),
        ]
    );
    assert_eq!(parser::incomplete_items(&doc), vec!["ALERTER", "TOILETTE", "MANGER"]);
}
