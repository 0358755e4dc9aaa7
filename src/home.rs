//! Defines the route handler for the home page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

fn home_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 max-w-md w-full"
            {
                h1 class="text-xl font-bold" { "Spendlog" }

                p class="text-gray-500 dark:text-gray-400"
                {
                    "Record your expenses and review where the money went, \
                    day by day, week by week, month by month."
                }

                ul class="space-y-2"
                {
                    li { (link(endpoints::NEW_EXPENSE, "Record an expense")) }
                    li { (link(endpoints::DAILY_VIEW, "Today's expenses")) }
                    li { (link(endpoints::WEEKLY_VIEW, "This week's expenses")) }
                    li { (link(endpoints::MONTHLY_VIEW, "This month's expenses")) }
                }
            }
        }
    };

    base("Home", &[], &content)
}

/// Renders the home page.
pub async fn get_home_page() -> Response {
    home_view().into_response()
}

#[cfg(test)]
mod view_tests {
    use axum::{body::Body, http::StatusCode, response::Response};
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::get_home_page;

    #[tokio::test]
    async fn home_page_links_to_all_views() {
        let response = get_home_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;
        assert!(
            document.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            document.errors
        );

        for endpoint in [
            endpoints::NEW_EXPENSE,
            endpoints::DAILY_VIEW,
            endpoints::WEEKLY_VIEW,
            endpoints::MONTHLY_VIEW,
        ] {
            assert_links_to(&document, endpoint);
        }
    }

    #[track_caller]
    fn assert_links_to(document: &Html, endpoint: &str) {
        let selector = Selector::parse(&format!("a[href=\"{endpoint}\"]")).unwrap();
        let links = document.select(&selector).collect::<Vec<_>>();
        assert!(
            !links.is_empty(),
            "want at least 1 link to {endpoint}, got none"
        );
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
