use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use popgrowth::{
    presets::PresetCatalog,
    web::{self, AppState},
    GrowthParameters, ModelType,
};

fn state() -> State<Arc<AppState>> {
    State(Arc::new(AppState {
        defaults: GrowthParameters::default(),
        catalog: PresetCatalog::builtin().unwrap(),
        max_time_span: 500,
    }))
}

#[tokio::test]
async fn series_endpoint_merges_query_into_defaults() {
    let report = web::series(state(), RawQuery(Some("model=logistic&T=10&r=oops".into())))
        .await
        .expect("valid request");
    let report = report.0;
    assert_eq!(report.parameters.model, ModelType::Logistic);
    assert_eq!(report.parameters.growth_rate, 0.05);
    assert_eq!(report.points.len(), 11);
    assert_eq!(report.query, "model=logistic&P0=1000&r=0.05&K=10000&T=10");
}

#[tokio::test]
async fn series_endpoint_without_query_uses_defaults() {
    let report = web::series(state(), RawQuery(None)).await.unwrap().0;
    assert_eq!(report.parameters, GrowthParameters::default());
    assert_eq!(report.points.len(), 101);
}

#[tokio::test]
async fn csv_endpoint_returns_export_body() {
    let response = web::series_csv(state(), RawQuery(Some("P0=1000&r=0.05&T=2".into())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"year,population\n0,1000\n1,1050\n2,1103");
}

#[tokio::test]
async fn presets_are_listed_with_queries() {
    let presets = web::list_presets(state()).await.0;
    let baseline = presets.iter().find(|p| p.name == "baseline").unwrap();
    assert_eq!(baseline.query, "model=exponential&P0=1000&r=0.05&K=10000&T=100");
}

#[tokio::test]
async fn unknown_preset_is_not_found() {
    let err = web::preset_series(state(), Path("atlantis".into()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_time_span_is_rejected() {
    let err = web::series(state(), RawQuery(Some("T=4294967295".into())))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let err = web::series_csv(state(), RawQuery(Some("T=501".into())))
        .await
        .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

    let report = web::series(state(), RawQuery(Some("T=500".into())))
        .await
        .unwrap()
        .0;
    assert_eq!(report.points.len(), 501);
}
