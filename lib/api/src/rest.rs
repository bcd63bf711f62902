use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer, Result as ActixResult};
use schemerec_core::Error;
use schemerec_storage::RecommenderContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_RECOMMENDATIONS: usize = 5;

fn default_recommendations() -> usize {
    DEFAULT_RECOMMENDATIONS
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: u64,
    #[serde(default = "default_recommendations")]
    pub num_recommendations: usize,
}

#[derive(Serialize)]
struct RecommendationResponse<'a> {
    recommendations: Vec<&'a schemerec_core::Scheme>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        context: Arc<RecommenderContext>,
        host: String,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .configure(Self::configure(context.clone()))
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }

    /// Routes and shared state, reusable from tests
    pub fn configure(
        context: Arc<RecommenderContext>,
    ) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg: &mut web::ServiceConfig| {
            let json_config = web::JsonConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({ "detail": detail })),
                )
                .into()
            });

            cfg.app_data(web::Data::new(context))
                .app_data(json_config)
                .route("/recommend", web::post().to(recommend))
                .route("/health", web::get().to(health));
        }
    }
}

async fn recommend(
    context: web::Data<Arc<RecommenderContext>>,
    req: web::Json<RecommendationRequest>,
) -> ActixResult<HttpResponse> {
    let ranker = match context.ranker() {
        Ok(r) => r,
        Err(e) => return Ok(internal_error(&e)),
    };

    match ranker.similar_to_user(req.user_id, req.num_recommendations) {
        Ok(similar) => {
            let recommendations = similar
                .into_iter()
                .filter_map(|(index, _)| context.scheme(index))
                .collect();
            Ok(HttpResponse::Ok().json(RecommendationResponse { recommendations }))
        }
        Err(Error::UserNotFound(user_id)) => {
            tracing::debug!("Recommendation requested for unknown user {}", user_id);
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "detail": "User not found"
            })))
        }
        Err(e) => Ok(internal_error(&e)),
    }
}

async fn health(context: web::Data<Arc<RecommenderContext>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "schemes": context.corpus().len(),
    })))
}

fn internal_error(e: &Error) -> HttpResponse {
    tracing::error!("Recommendation failed: {}", e);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "detail": e.to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use schemerec_core::VectorSpaceConfig;
    use schemerec_storage::CorpusLoader;

    const DATASET: &str = "scheme_name,description,age,social_category,gender,domicile_of_tripura,user_id\n\
        Housing,rural housing grant for poor families,26-30,SC,M,Y,1\n\
        Housing Plus,rural housing grant,26-30,SC,M,Y,2\n\
        Pension,old age pension,Above 50,OBC,F,N,3\n\
        Scholarship,scholarship for students,16-20,ST,F,Y,4\n";

    fn context() -> Arc<RecommenderContext> {
        let corpus = CorpusLoader::new()
            .require_user_id(true)
            .load_from_reader(DATASET.as_bytes())
            .unwrap();
        Arc::new(RecommenderContext::build(corpus, VectorSpaceConfig::default()).unwrap())
    }

    #[actix_web::test]
    async fn test_recommend_for_known_user() {
        let app = test::init_service(App::new().configure(RestApi::configure(context()))).await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "user_id": 1, "num_recommendations": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0]["scheme_name"], "Housing Plus");
        assert_eq!(recs[0]["age"], "26-30");
        assert!(recs.iter().all(|r| r["user_id"] != 1));
    }

    #[actix_web::test]
    async fn test_default_recommendation_count() {
        let app = test::init_service(App::new().configure(RestApi::configure(context()))).await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "user_id": 3 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        // four rows minus the querying user
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_unknown_user_is_not_found() {
        let app = test::init_service(App::new().configure(RestApi::configure(context()))).await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "user_id": 999999 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "User not found");
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test::init_service(App::new().configure(RestApi::configure(context()))).await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "user_id": "abc" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(RestApi::configure(context()))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["schemes"], 4);
    }
}
