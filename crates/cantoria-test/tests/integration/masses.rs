//! Mass scheduling and per-section programs.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

/// ## Summary
/// A Christmas mass gets an entrance song, shows up in its section and the
/// fill rate, and takes its songs and assignments along when deleted.
#[test_log::test(tokio::test)]
async fn christmas_mass_program_lifecycle() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let musico = db.musico_token().await;

    let mass_id = db.seed_mass(&admin, "2025-12-25", "20:00", "Missa de Natal").await;

    let song = TestRequest::post(&format!("/api/missas/{mass_id}/musicas"))
        .bearer(&musico)
        .json(json!({ "nome": "Noite Feliz", "secaoLiturgica": "entrada" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(song["missa_id"], mass_id.as_str());
    assert_eq!(song["secao_liturgica"], "entrada");
    let song_id = song["id"].as_str().expect("id").to_string();

    let joao = db.seed_musician(&admin, "João", "Violão").await;
    let _assigned = TestRequest::post(&format!("/api/missas/{mass_id}/musicos"))
        .bearer(&admin)
        .json(json!({ "musico_id": joao }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);

    let entrance = TestRequest::get(&format!("/api/missas/{mass_id}/musicas?secao=entrada"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(entrance.as_array().map(Vec::len), Some(1));
    assert_eq!(entrance[0]["nome"], "Noite Feliz");

    let gloria = TestRequest::get(&format!("/api/missas/{mass_id}/musicas?secao=gloria"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(gloria.as_array().map(Vec::len), Some(0));

    let program = TestRequest::get(&format!("/api/missas/{mass_id}/programa"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(program["secoes"].as_array().map(Vec::len), Some(10));
    assert_eq!(program["secoes"][0]["secao"], "entrada");
    assert_eq!(program["preenchimento"]["geral"], 10);

    let fill = TestRequest::get(&format!("/api/missas/{mass_id}/preenchimento"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fill, program["preenchimento"]);

    let detail = TestRequest::get(&format!("/api/missas/{mass_id}"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(detail["horario"], "20:00");
    assert_eq!(detail["musicas"].as_array().map(Vec::len), Some(1));

    let deleted = TestRequest::delete(&format!("/api/missas/{mass_id}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(deleted["success"], true);

    let _gone = TestRequest::get(&format!("/api/missas/{mass_id}/musicas"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let _song_gone = TestRequest::delete(&format!("/api/musicas/{song_id}"))
        .bearer(&musico)
        .send(&db.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let dashboard = TestRequest::get("/api/analytics")
        .bearer(&musico)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(dashboard["totais"]["missas"], 0);
    assert_eq!(dashboard["musicos_mais_atuantes"].as_array().map(Vec::len), Some(0));
    assert_eq!(dashboard["musicas_mais_usadas"].as_array().map(Vec::len), Some(0));
}

/// ## Summary
/// Updating a mass keeps its creation time and moves `updated_at` forward.
#[test_log::test(tokio::test)]
async fn updates_refresh_the_modification_time() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;

    let created = TestRequest::post("/api/missas")
        .bearer(&admin)
        .json(json!({ "data": "2025-06-01", "horario": "10:00", "tipo": "Domingo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);
    let mass_id = created.id();

    let updated = TestRequest::put(&format!("/api/missas/{mass_id}"))
        .bearer(&admin)
        .json(json!({ "tipo": "Domingo de Pentecostes" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(updated.json()["tipo"], "Domingo de Pentecostes");
    assert_eq!(updated.timestamp("created_at"), created.timestamp("created_at"));
    assert!(
        updated.timestamp("updated_at") > updated.timestamp("created_at"),
        "{}",
        updated.body
    );
}

#[test_log::test(tokio::test)]
async fn unknown_section_is_rejected() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let mass_id = db.seed_mass(&admin, "2025-06-01", "10:00", "Domingo").await;

    let res = TestRequest::post(&format!("/api/missas/{mass_id}/musicas"))
        .bearer(&admin)
        .json(json!({ "nome": "Aleluia", "secao_liturgica": "homilia" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(res.error().contains("homilia"), "{}", res.error());

    let res = TestRequest::get(&format!("/api/missas/{mass_id}/musicas?secao=homilia"))
        .send(&db.service)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Removing a song through the wrong mass fails and leaves the song in place.
/// Removing it twice fails the second time.
#[test_log::test(tokio::test)]
async fn remove_song_requires_matching_mass() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let first = db.seed_mass(&admin, "2025-06-01", "08:00", "Domingo").await;
    let second = db.seed_mass(&admin, "2025-06-08", "08:00", "Domingo").await;

    let song_id = TestRequest::post("/api/musicas")
        .bearer(&admin)
        .json(json!({ "missa_id": first, "nome": "Santo", "secao_liturgica": "santo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .id();

    let _wrong = TestRequest::delete(&format!("/api/missas/{second}/musicas/{song_id}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let songs = TestRequest::get(&format!("/api/missas/{first}/musicas"))
        .send(&db.service)
        .await
        .json();
    assert_eq!(songs.as_array().map(Vec::len), Some(1));

    let _removed = TestRequest::delete(&format!("/api/missas/{first}/musicas/{song_id}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK);
    let _again = TestRequest::delete(&format!("/api/missas/{first}/musicas/{song_id}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn song_section_cannot_change_in_place() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let mass_id = db.seed_mass(&admin, "2025-06-01", "10:00", "Domingo").await;

    let song_id = TestRequest::post(&format!("/api/missas/{mass_id}/musicas"))
        .bearer(&admin)
        .json(json!({ "nome": "Glória a Deus", "secao_liturgica": "gloria" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .id();

    let _moved = TestRequest::put(&format!("/api/musicas/{song_id}"))
        .bearer(&admin)
        .json(json!({ "secao_liturgica": "final" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let updated = TestRequest::put(&format!("/api/musicas/{song_id}"))
        .bearer(&admin)
        .json(json!({ "cantor": "Coral" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["cantor"], "Coral");
    assert_eq!(updated["secao_liturgica"], "gloria");
}

#[test_log::test(tokio::test)]
async fn mass_list_is_ordered_and_filterable() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    db.seed_mass(&admin, "2025-12-25", "20:00", "Missa de Natal").await;
    db.seed_mass(&admin, "2025-06-01", "10:00", "Domingo").await;
    db.seed_mass(&admin, "2025-06-01", "08:00", "Domingo").await;

    let all = TestRequest::get("/api/missas").send(&db.service).await.json();
    let order: Vec<(&str, &str)> = all
        .as_array()
        .expect("array")
        .iter()
        .map(|mass| {
            (
                mass["data"].as_str().unwrap_or_default(),
                mass["horario"].as_str().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("2025-06-01", "08:00"),
            ("2025-06-01", "10:00"),
            ("2025-12-25", "20:00")
        ]
    );

    let natal = TestRequest::get("/api/missas?q=natal").send(&db.service).await.json();
    assert_eq!(natal.as_array().map(Vec::len), Some(1));

    let december = TestRequest::get("/api/missas?q=2025-12").send(&db.service).await.json();
    assert_eq!(december.as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn mass_writes_need_an_admin() {
    let Some(db) = TestDb::new().await else { return };
    let musico = db.musico_token().await;

    let _forbidden = TestRequest::post("/api/missas")
        .bearer(&musico)
        .json(json!({ "data": "2025-06-01", "horario": "10:00", "tipo": "Domingo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let _invalid = TestRequest::post("/api/missas")
        .bearer(&db.admin_token().await)
        .json(json!({ "data": "01/06/2025", "horario": "10:00", "tipo": "Domingo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
