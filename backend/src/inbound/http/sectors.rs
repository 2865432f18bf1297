//! Sector catalogue for submission forms.

use actix_web::{get, web};

use crate::domain::Sector;

/// List the sectors a comment can be filed under, in presentation order.
#[utoipa::path(
    get,
    path = "/api/v1/sectors",
    responses((status = 200, description = "Sector labels", body = [String])),
    tags = ["comments"],
    operation_id = "listSectors",
    security([])
)]
#[get("/sectors")]
pub async fn list_sectors() -> web::Json<Vec<&'static str>> {
    web::Json(Sector::ALL.into_iter().map(Sector::label).collect())
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn lists_every_sector_label() {
        let app = test::init_service(App::new().service(list_sectors)).await;
        let labels: Vec<String> =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/sectors").to_request())
                .await;
        assert_eq!(labels.len(), Sector::ALL.len());
        assert_eq!(labels.first().map(String::as_str), Some("Agriculture"));
        assert!(labels.iter().any(|label| label == "Mining and quarrying"));
    }
}
