//! Availability blocks and their effect on assignment listings.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn custom_reason_is_required_for_outro() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let ana = db.seed_musician(&admin, "Ana", "Soprano").await;

    let res = TestRequest::post("/api/indisponibilidades")
        .bearer(&admin)
        .json(json!({
            "musico_id": ana,
            "data_inicio": "2025-07-01",
            "data_fim": "2025-07-03",
            "motivo": "outro"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(res.error().contains("motivo_personalizado"), "{}", res.error());

    let block = TestRequest::post("/api/indisponibilidades")
        .bearer(&admin)
        .json(json!({
            "musico_id": ana,
            "data_inicio": "2025-07-01",
            "data_fim": "2025-07-03",
            "motivo": "outro",
            "motivo_personalizado": "Retiro espiritual"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(block["rotulo"], "Retiro espiritual");

    let vacation = TestRequest::post("/api/indisponibilidades")
        .bearer(&admin)
        .json(json!({
            "musicoId": ana,
            "dataInicio": "2025-08-10",
            "dataFim": "2025-08-10",
            "motivo": "ferias",
            "motivoPersonalizado": "ignored"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(vacation["rotulo"], "Férias");
    assert!(vacation["motivo_personalizado"].is_null());
}

#[test_log::test(tokio::test)]
async fn inverted_ranges_are_rejected_on_create_and_update() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let ana = db.seed_musician(&admin, "Ana", "Soprano").await;

    let _inverted = TestRequest::post("/api/indisponibilidades")
        .bearer(&admin)
        .json(json!({
            "musico_id": ana,
            "data_inicio": "2025-07-05",
            "data_fim": "2025-07-01",
            "motivo": "doenca"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let block_id = TestRequest::post("/api/indisponibilidades")
        .bearer(&admin)
        .json(json!({
            "musico_id": ana,
            "data_inicio": "2025-07-01",
            "data_fim": "2025-07-05",
            "motivo": "doenca"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .id();

    let _inverted_update = TestRequest::put(&format!("/api/indisponibilidades/{block_id}"))
        .bearer(&admin)
        .json(json!({ "data_inicio": "2025-07-10" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let extended = TestRequest::put(&format!("/api/indisponibilidades/{block_id}"))
        .bearer(&admin)
        .json(json!({ "data_fim": "2025-07-12" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(extended["data_fim"], "2025-07-12");
    assert_eq!(extended["rotulo"], "Doença");
}

/// ## Summary
/// A blocked musician can still be assigned; the listing flags them and the
/// same musician cannot be assigned twice.
#[test_log::test(tokio::test)]
async fn blocked_musicians_are_flagged_on_assignment() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let musico = db.musico_token().await;
    let ana = db.seed_musician(&admin, "Ana", "Soprano").await;
    let joao = db.seed_musician(&admin, "João", "Violão").await;
    let mass_id = db.seed_mass(&admin, "2025-07-06", "10:00", "Domingo").await;

    let _block = TestRequest::post("/api/indisponibilidades")
        .bearer(&admin)
        .json(json!({
            "musico_id": ana,
            "data_inicio": "2025-07-01",
            "data_fim": "2025-07-31",
            "motivo": "compromisso_pessoal"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);

    for musician in [&ana, &joao] {
        let _assigned = TestRequest::post(&format!("/api/missas/{mass_id}/musicos"))
            .bearer(&admin)
            .json(json!({ "musico_id": musician }))
            .send(&db.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let _duplicate = TestRequest::post(&format!("/api/missas/{mass_id}/musicos"))
        .bearer(&admin)
        .json(json!({ "musico_id": ana }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let assigned = TestRequest::get(&format!("/api/missas/{mass_id}/musicos"))
        .bearer(&musico)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let flags: Vec<(String, bool)> = assigned
        .as_array()
        .expect("array")
        .iter()
        .map(|row| {
            (
                row["nome"].as_str().unwrap_or_default().to_string(),
                row["indisponivel"].as_bool().unwrap_or_default(),
            )
        })
        .collect();
    assert!(flags.contains(&("Ana".to_string(), true)), "{flags:?}");
    assert!(flags.contains(&("João".to_string(), false)), "{flags:?}");

    let _unassigned = TestRequest::delete(&format!("/api/missas/{mass_id}/musicos/{ana}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK);

    let per_musician = TestRequest::get(&format!("/api/indisponibilidades?musico_id={joao}"))
        .bearer(&musico)
        .send(&db.service)
        .await
        .json();
    assert_eq!(per_musician.as_array().map(Vec::len), Some(0));
}

/// ## Summary
/// Two simultaneous bookings of the same musician end in one success and one
/// validation error, never a server error.
#[test_log::test(tokio::test)]
async fn simultaneous_bookings_conflict_cleanly() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let ana = db.seed_musician(&admin, "Ana", "Soprano").await;
    let mass_id = db.seed_mass(&admin, "2025-06-01", "10:00", "Domingo").await;

    let path = format!("/api/missas/{mass_id}/musicos");
    let book = || {
        TestRequest::post(&path)
            .bearer(&admin)
            .json(json!({ "musico_id": ana }))
            .send(&db.service)
    };
    let (first, second) = tokio::join!(book(), book());

    let mut statuses = vec![first.status, second.status];
    statuses.sort();
    assert_eq!(
        statuses,
        vec![StatusCode::CREATED, StatusCode::BAD_REQUEST],
        "{} / {}",
        first.body,
        second.body
    );

    let assigned = TestRequest::get(&path)
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(assigned.as_array().map(Vec::len), Some(1));
}
