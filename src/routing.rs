//! Application router configuration.

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_daily_expenses_page,
        get_monthly_expenses_page, get_new_expense_page, get_weekly_expenses_page,
    },
    home::get_home_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::NEW_EXPENSE,
            get(get_new_expense_page).post(create_expense_endpoint),
        )
        .route(endpoints::DAILY_VIEW, get(get_daily_expenses_page))
        .route(endpoints::WEEKLY_VIEW, get(get_weekly_expenses_page))
        .route(endpoints::MONTHLY_VIEW, get(get_monthly_expenses_page))
        .route(endpoints::DELETE_EXPENSE, get(delete_expense_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
