//! Welcome page listing the available routes.

use axum::extract::State;
use std::sync::Arc;

use crate::state::AppState;

/// Handle GET / requests
pub async fn welcome_handler(State(state): State<Arc<AppState>>) -> String {
    render_welcome(&state)
}

fn render_welcome(state: &AppState) -> String {
    let rule = "-".repeat(72);
    let availability = match (&state.dataset.first_date, &state.dataset.last_date) {
        (Some(first), Some(last)) => format!("Data available from {} to {}", first, last),
        _ => "No measurements available".to_string(),
    };

    format!(
        "Welcome to Surf's Up!: Hawai'i Climate Analysis API!\n\
         {rule}\n\
         Available Routes:\n\
         /api/v1.0/stations          (List of weather observation stations.)\n\
         /api/v1.0/precipitation     (Precipitation data since {since}.)\n\
         /api/v1.0/tobs              (Temperature data from station {station} since {since}.)\n\
         {rule}\n\
         Date Searches (yyyy-mm-dd):\n\
         /api/v1.0/temp/start        (Low, High & Average temp for each day from a specified date.)\n\
         /api/v1.0/temp/start/end    (Low, High & Average temp for each day in a given date range.)\n\
         Add ?group=none to either search for a single summary of the whole range.\n\
         {rule}\n\
         {availability}\n",
        since = state.window_start_param(),
        station = state.tobs_station(),
    )
}
