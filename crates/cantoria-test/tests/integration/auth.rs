//! Login, session resolution and the dashboard.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn login_issues_a_working_token() {
    let Some(db) = TestDb::new().await else { return };

    let _wrong = TestRequest::post("/api/auth/login")
        .json(json!({ "email": MUSICO_EMAIL, "password": "nope" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let _unknown = TestRequest::post("/api/auth/login")
        .json(json!({ "email": "ninguem@paroquia.test", "password": "nope" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let token = db.login(&MUSICO_EMAIL.to_uppercase(), MUSICO_PASSWORD).await;

    let me = TestRequest::get("/api/auth/me")
        .bearer(&token)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["user"]["email"], MUSICO_EMAIL);
    assert_eq!(me["user"]["tipo"], "musico");

    let logout = TestRequest::post("/api/auth/logout")
        .bearer(&token)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(logout["success"], true);

    let _unknown_token = TestRequest::get("/api/auth/me")
        .bearer("not-a-real-token")
        .send(&db.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn dashboard_aggregates_the_store() {
    let Some(db) = TestDb::new().await else { return };
    let admin = db.admin_token().await;
    let ana = db.seed_musician(&admin, "Ana", "Soprano").await;
    let mass_id = db.seed_mass(&admin, "2025-12-25", "20:00", "Missa de Natal").await;

    let _song = TestRequest::post(&format!("/api/missas/{mass_id}/musicas"))
        .bearer(&admin)
        .json(json!({ "nome": "Noite Feliz", "secao_liturgica": "entrada" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);
    let _assigned = TestRequest::post(&format!("/api/missas/{mass_id}/musicos"))
        .bearer(&admin)
        .json(json!({ "musico_id": ana }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);
    let _suggestion = TestRequest::post(&format!("/api/musicos/{ana}/sugestoes"))
        .json(json!({ "texto": "Cantar em latim" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::CREATED);

    let dashboard = TestRequest::get("/api/analytics")
        .bearer(&db.musico_token().await)
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(dashboard["totais"]["missas"], 1);
    assert_eq!(dashboard["totais"]["musicos"], 1);
    assert_eq!(dashboard["totais"]["sugestoes_pendentes"], 1);
    assert_eq!(dashboard["missas_por_mes"][0]["mes"], "2025-12");
    assert_eq!(dashboard["musicos_mais_atuantes"][0]["nome"], "Ana");
    assert_eq!(dashboard["musicas_mais_usadas"][0]["nome"], "Noite Feliz");
    assert_eq!(dashboard["preenchimento_secoes"][0]["secao"], "entrada");
    assert_eq!(dashboard["preenchimento_secoes"][0]["preenchimento"], 100);
    assert_eq!(dashboard["preenchimento_secoes"][1]["preenchimento"], 0);
}

#[test_log::test(tokio::test)]
async fn converter_links_need_a_session() {
    let Some(db) = TestDb::new().await else { return };

    let links = TestRequest::post("/api/search/youtube-to-mp3")
        .bearer(&db.musico_token().await)
        .json(json!({ "url": "https://youtu.be/dQw4w9WgXcQ" }))
        .send(&db.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(links["video_id"], "dQw4w9WgXcQ");
    assert_eq!(links["link_youtube"], "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

    let _no_key = TestRequest::get("/api/search/music?q=aleluia")
        .bearer(&db.musico_token().await)
        .send(&db.service)
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}
