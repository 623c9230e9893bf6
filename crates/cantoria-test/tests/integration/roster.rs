//! Musicians with their notes and suggestions.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

/// ## Summary
/// Ana's suggestion starts pending, is marked implemented and shows up in the
/// grouped listing under her id.
#[test_log::test(tokio::test)]
async fn suggestion_status_lifecycle() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let ana = db.seed_musician(&admin, "Ana", "Soprano").await;

    let suggestion = TestRequest::post(&format!("/api/musicos/{ana}/sugestoes"))
        .json(json!({ "texto": "Ensaiar o Glória em latim" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(suggestion["status"], "pendente");
    let suggestion_id = suggestion["id"].as_str().expect("id").to_string();

    let updated = TestRequest::put(&format!("/api/sugestoes/{suggestion_id}"))
        .json(json!({ "status": "implementada" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["status"], "implementada");
    assert_eq!(updated["texto"], "Ensaiar o Glória em latim");

    let _invalid = TestRequest::put(&format!("/api/sugestoes/{suggestion_id}"))
        .json(json!({ "status": "arquivada" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let grouped = TestRequest::get("/api/sugestoes")
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(grouped[ana.as_str()][0]["status"], "implementada");
}

/// ## Summary
/// Deleting a musician removes their notes, suggestions and availability
/// blocks, leaving other musicians' records alone.
#[test_log::test(tokio::test)]
async fn deleting_a_musician_cascades() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let joao = db.seed_musician(&admin, "João", "Violão").await;
    let maria = db.seed_musician(&admin, "Maria", "Teclado").await;

    for musician in [&joao, &maria] {
        let _note = TestRequest::post(&format!("/api/musicos/{musician}/anotacoes"))
            .json(json!({ "texto": "Chega cedo" }))
            .send(&db.service)
            .await
            .assert_status(StatusCode::CREATED);
        let _suggestion = TestRequest::post(&format!("/api/musicos/{musician}/sugestoes"))
            .json(json!({ "texto": "Mais ensaios" }))
            .send(&db.service)
            .await
            .assert_status(StatusCode::CREATED);
        let _block = TestRequest::post("/api/indisponibilidades")
            .bearer(&admin)
            .json(json!({
                "musico_id": musician,
                "data_inicio": "2025-07-01",
                "data_fim": "2025-07-15",
                "motivo": "ferias"
            }))
            .send(&db.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let _deleted = TestRequest::delete(&format!("/api/musicos/{joao}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK);

    let notes = TestRequest::get("/api/anotacoes").send(&db.service).await.json();
    assert!(notes.get(joao.as_str()).is_none());
    assert_eq!(notes[maria.as_str()].as_array().map(Vec::len), Some(1));

    let suggestions = TestRequest::get("/api/sugestoes").send(&db.service).await.json();
    assert!(suggestions.get(joao.as_str()).is_none());

    let _gone = TestRequest::get(&format!("/api/musicos/{joao}/anotacoes"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let blocks = TestRequest::get("/api/indisponibilidades")
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let owners: Vec<&str> = blocks
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|block| block["musico_id"].as_str())
        .collect();
    assert_eq!(owners, vec![maria.as_str()]);

    let joao_blocks = TestRequest::get(&format!("/api/indisponibilidades?musico_id={joao}"))
        .bearer(&admin)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(joao_blocks.as_array().map(Vec::len), Some(0));
}

/// ## Summary
/// Updating a musician keeps the creation time and moves `updated_at` forward.
#[test_log::test(tokio::test)]
async fn musician_updates_refresh_the_modification_time() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;

    let created = TestRequest::post("/api/musicos")
        .bearer(&admin)
        .json(json!({ "nome": "Pedro", "funcao": "Baixo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);
    let pedro = created.id();

    let updated = TestRequest::put(&format!("/api/musicos/{pedro}"))
        .bearer(&admin)
        .json(json!({ "disponivel": false }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(updated.json()["disponivel"], false);
    assert_eq!(updated.timestamp("created_at"), created.timestamp("created_at"));
    assert!(
        updated.timestamp("updated_at") > updated.timestamp("created_at"),
        "{}",
        updated.body
    );
}

#[test_log::test(tokio::test)]
async fn musician_roster_rules() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let musico = db.musico_token().await;

    let _forbidden = TestRequest::post("/api/musicos")
        .bearer(&musico)
        .json(json!({ "nome": "Pedro", "funcao": "Baixo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let _missing_role = TestRequest::post("/api/musicos")
        .bearer(&admin)
        .json(json!({ "nome": "Pedro" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let pedro = TestRequest::post("/api/musicos")
        .bearer(&admin)
        .json(json!({ "nome": "Pedro", "funcao": "Baixo" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(pedro["disponivel"], true);
    db.seed_musician(&admin, "Ana", "Soprano").await;

    let names: Vec<String> = TestRequest::get("/api/musicos")
        .bearer(&musico)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|musician| musician["nome"].as_str().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["Ana".to_string(), "Pedro".to_string()]);

    let basses = TestRequest::get("/api/musicos?q=baixo")
        .bearer(&musico)
        .send(&db.service)
        .await
        .json();
    assert_eq!(basses.as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn library_songs_round_trip_through_the_api() {
    let Some(db) = TestDb::new().await else { return };

    let song = TestRequest::post("/api/biblioteca-musicas")
        .json(json!({
            "nome": "Ave Maria",
            "secao_liturgica": "final",
            "youtube_video_id": "dQw4w9WgXcQ",
            "duracao": "4:12"
        }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let song_id = song["id"].as_str().expect("id").to_string();

    let _bad_section = TestRequest::put(&format!("/api/biblioteca-musicas/{song_id}"))
        .json(json!({ "secao_liturgica": "sermao" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let _deleted = TestRequest::delete(&format!("/api/biblioteca-musicas/{song_id}"))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK);

    let library = TestRequest::get("/api/biblioteca-musicas").send(&db.service).await.json();
    assert_eq!(library.as_array().map(Vec::len), Some(0));
}
