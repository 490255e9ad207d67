mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{employee_body, TestApp};

struct Setup {
    app: TestApp,
    token: String,
    mall: String,
    store: String,
}

async fn setup() -> Result<Setup> {
    let app = TestApp::new();
    let token = app.user_token("firstuser@test.com").await?;
    let mall = app.create_mall(&token, "FrunPark").await?.id();
    let store = app.create_store(&token, "McDonalds").await?.id();
    Ok(Setup { app, token, mall, store })
}

impl Setup {
    fn employees_uri(&self) -> String {
        format!("/api/malls/{}/{}/employees", self.mall, self.store)
    }
}

#[tokio::test]
async fn hire_binds_employee_to_mall_and_store() -> Result<()> {
    let s = setup().await?;

    let res = s.app.post(&s.employees_uri(), Some(&s.token), employee_body("Fabian")).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["mall"], s.mall.as_str());
    assert_eq!(res.body["store"], s.store.as_str());
    assert_eq!(res.body["type"], "Manager");
    assert_eq!(res.body["salary"], 3200.0);

    let mall = s.app.get(&format!("/api/malls/{}", s.mall)).await?;
    assert_eq!(mall.body["employees"], json!([res.id()]));

    let listed = s.app.get(&format!("/api/malls/{}/employees", s.mall)).await?;
    assert_eq!(listed.body, json!([res.body]));

    let one = s.app.get(&format!("/api/malls/{}/{}", s.mall, res.id())).await?;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body, res.body);
    Ok(())
}

#[tokio::test]
async fn type_salary_and_date_are_checked_independently() -> Result<()> {
    let s = setup().await?;

    for (field, value) in [
        ("type", json!("Director")),
        ("salary", json!("a lot")),
        ("hireDate", json!("not a date")),
    ] {
        let mut body = employee_body("Fabian");
        body[field] = value;
        let res = s.app.post(&s.employees_uri(), Some(&s.token), body).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{} should fail", field);
        assert_eq!(res.body["field"], field);
    }

    let listed = s.app.get(&format!("/api/malls/{}/employees", s.mall)).await?;
    assert_eq!(listed.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn hire_requires_existing_mall_and_store() -> Result<()> {
    let s = setup().await?;

    let uri = format!("/api/malls/{}/{}/employees", s.mall, uuid::Uuid::new_v4());
    let res = s.app.post(&uri, Some(&s.token), employee_body("Fabian")).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Store not found");

    let uri = format!("/api/malls/wrongId/{}/employees", s.store);
    let res = s.app.post(&uri, Some(&s.token), employee_body("Fabian")).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_keeps_ownership() -> Result<()> {
    let s = setup().await?;
    let hired = s.app.post(&s.employees_uri(), Some(&s.token), employee_body("Fabian")).await?;

    let mut body = employee_body("Fabienne");
    body["type"] = json!("Intern");
    body["salary"] = json!("1500");
    let uri = format!("/api/malls/{}/{}", s.mall, hired.id());
    let res = s.app.put(&uri, Some(&s.token), body).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["firstName"], "Fabienne");
    assert_eq!(res.body["type"], "Intern");
    assert_eq!(res.body["salary"], 1500.0);
    assert_eq!(res.body["mall"], s.mall.as_str());
    assert_eq!(res.body["store"], s.store.as_str());
    assert_eq!(res.id(), hired.id());
    Ok(())
}

#[tokio::test]
async fn fire_requires_admin_and_returns_prior_state() -> Result<()> {
    let s = setup().await?;
    let admin = s.app.admin_token("admin@test.com").await?;
    let hired = s.app.post(&s.employees_uri(), Some(&s.token), employee_body("Fabian")).await?;
    let uri = format!("/api/malls/{}/{}", s.mall, hired.id());

    let res = s.app.delete(&uri, Some(&s.token)).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = s.app.delete(&uri, Some(&admin)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, hired.body);

    let mall = s.app.get(&format!("/api/malls/{}", s.mall)).await?;
    assert_eq!(mall.body["employees"], json!([]));
    assert_eq!(s.app.get(&uri).await?.status, StatusCode::NOT_FOUND);

    let res = s.app.delete(&uri, Some(&admin)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn employee_of_another_mall_is_not_found() -> Result<()> {
    let s = setup().await?;
    let other = s.app.create_mall(&s.token, "Wijnegem Shopping").await?;
    let hired = s.app.post(&s.employees_uri(), Some(&s.token), employee_body("Fabian")).await?;

    let res = s.app.get(&format!("/api/malls/{}/{}", other.id(), hired.id())).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = s
        .app
        .put(&format!("/api/malls/{}/{}", other.id(), hired.id()), Some(&s.token), employee_body("Fabienne"))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
