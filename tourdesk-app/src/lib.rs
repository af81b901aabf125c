use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::sync::Arc;
use tourdesk_booking::{
    BookingField, BookingServices, BookingWorkflow, ConfirmedBooking, GeoPoint, QrSvgEncoder,
    WorkflowError,
};
use tourdesk_catalog::{load_catalog, Catalog, SortKey, TourListController, TourOffer};
use tourdesk_core::app_config::Config;
use tourdesk_core::layout::Viewport;
use tourdesk_core::{AuthGate, Session};
use tourdesk_details::{AdvisorPrompt, DetailsPresenter};
use tourdesk_shared::models::events::{AdvisorRequestedEvent, AuthRequiredEvent};

#[derive(Debug, Parser)]
#[command(name = "tourdesk", about = "Browse, inspect and book tours")]
pub struct Cli {
    /// Catalog JSON file, overrides `catalog.path`
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Opaque token of the signed-in user
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[arg(long, global = true, default_value_t = 1280.0)]
    pub viewport_width: f64,

    #[arg(long, global = true, default_value_t = 800.0)]
    pub viewport_height: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List tours in display order
    List {
        /// default, price-low, price-high, rating or newest
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one tour
    Details {
        id: i64,
        #[arg(long)]
        ask_ai: bool,
        #[arg(long)]
        book: bool,
    },
    /// Book a tour
    Book {
        id: i64,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "1")]
        party: String,
        #[arg(long)]
        pickup: Option<String>,
        #[arg(long)]
        requests: Option<String>,
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
}

/// Builds the gate the way the host wires it: a blocked attempt is logged
/// as an `AuthRequiredEvent`.
fn auth_gate(user: Option<String>, tour_id: i64, source: &'static str) -> AuthGate {
    AuthGate::new(
        Session::from_token(user),
        Arc::new(move || {
            let event = AuthRequiredEvent::now(tour_id, source);
            tracing::warn!("{}", serde_json::to_string(&event).unwrap_or_default());
        }),
    )
}

fn log_advisor_request(offer: &TourOffer) {
    let event = AdvisorRequestedEvent::now(offer.id, AdvisorPrompt::for_offer(offer));
    tracing::info!("{}", serde_json::to_string(&event).unwrap_or_default());
}

fn log_confirmed(booking: ConfirmedBooking) {
    tracing::info!("Host received booking {} for tour {}", booking.id, booking.tour_id);
}

pub async fn run(cli: Cli, config: &Config) -> anyhow::Result<Value> {
    let path = cli.catalog.clone().unwrap_or_else(|| config.catalog.path.clone());
    let catalog = load_catalog(&path).with_context(|| format!("loading catalog from {}", path))?;
    let catalog = Arc::new(catalog);
    let viewport = Viewport::new(cli.viewport_width, cli.viewport_height);

    match cli.command {
        Command::List { sort, search } => {
            let mut list = TourListController::new(catalog, auth_gate(cli.user, 0, "list"));
            list.set_sort(SortKey::from_param(sort.as_deref()));
            list.set_search(search);

            Ok(json!({
                "sort": list.query().sort,
                "tours": list.visible(),
            }))
        }
        Command::Details { id, ask_ai, book } => {
            details(&catalog, id, cli.user, ask_ai, book, viewport, config)
        }
        Command::Book { id, name, email, phone, party, pickup, requests, lat, lng } => {
            let gate = auth_gate(cli.user, id, "list");
            let mut list = TourListController::new(catalog.clone(), gate);
            let Some(request) = list.book(id, &[])? else {
                return Ok(json!({ "status": "authentication_required" }));
            };
            let booked_by = list.session().user().map(|user| user.0.clone());
            tracing::info!("Opening booking form for tour {} as {:?}", id, booked_by);

            let offer = lookup(&catalog, request.offer_id)?;
            let geolocation = lat.zip(lng).map(|(lat, lng)| GeoPoint::new(lat, lng));
            let services = BookingServices {
                encoder: Arc::new(QrSvgEncoder),
                listener: Arc::new(log_confirmed),
            };
            let mut flow = BookingWorkflow::open(
                offer,
                request.anchor,
                geolocation,
                config.booking.clone(),
                services,
            );

            flow.edit(BookingField::FullName, name);
            flow.edit(BookingField::Email, email);
            flow.edit(BookingField::Phone, phone);
            flow.edit(BookingField::PartySize, party);
            flow.edit(BookingField::PickupLocation, pickup.unwrap_or_default());
            flow.edit(BookingField::SpecialRequests, requests.unwrap_or_default());

            let placement = flow.placement(viewport, &config.layout);
            let result = flow.submit().await;
            list.close_modal();

            match result {
                Ok(_) => {
                    let confirmation = flow
                        .confirmation()
                        .context("workflow did not reach confirmation")?;
                    Ok(json!({
                        "status": "confirmed",
                        "bookedBy": booked_by,
                        "placement": placement,
                        "confirmation": confirmation,
                        "event": confirmation.to_event(),
                    }))
                }
                Err(WorkflowError::Invalid(errors)) => Ok(json!({
                    "status": "invalid",
                    "errors": errors,
                })),
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn details(
    catalog: &Catalog,
    id: i64,
    user: Option<String>,
    ask_ai: bool,
    book: bool,
    viewport: Viewport,
    config: &Config,
) -> anyhow::Result<Value> {
    let offer = lookup(catalog, id)?;
    let gate = auth_gate(user, id, "details");
    let presenter = DetailsPresenter::new(offer, None, gate, Arc::new(log_advisor_request));

    if ask_ai {
        presenter.ask_ai();
    }
    let book_status = if !book {
        Value::Null
    } else if presenter.book_now().is_some() {
        json!("booking_form_opened")
    } else {
        json!("authentication_required")
    };

    Ok(json!({
        "tour": presenter.view(),
        "placement": presenter.placement(viewport, &config.layout),
        "book": book_status,
    }))
}

fn lookup(catalog: &Catalog, id: i64) -> anyhow::Result<TourOffer> {
    catalog
        .get(id)
        .cloned()
        .ok_or_else(|| tourdesk_catalog::CatalogError::NotFound(id).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"[
        { "id": 1, "title": "Murree Day Trip", "agency": "Capital Tours", "price": 4500,
          "rating": 4.1 },
        { "id": 2, "title": "Hunza Explorer", "agency": "Karakoram Co", "price": 52000,
          "rating": 4.9, "features": ["Hotel", "Jeep"] },
        { "id": 3, "title": "Lahore Heritage Walk", "agency": "Old City Guides", "price": 3000 },
        { "id": 4, "title": "Private Expedition", "agency": "Summit Co",
          "price": 4611686018427387904 }
    ]"#;

    fn catalog_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        file
    }

    fn cli(file: &tempfile::NamedTempFile, args: &[&str]) -> Cli {
        let path = file.path().to_str().unwrap().to_string();
        let mut argv = vec!["tourdesk", "--catalog", path.as_str()];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[tokio::test]
    async fn test_list_sorted_by_rating() {
        let file = catalog_file();
        let args = ["list", "--sort", "rating"];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        let tours = out["tours"].as_array().unwrap();
        let ids: Vec<i64> = tours.iter().map(|t| t["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
        assert_eq!(out["sort"], "rating");
    }

    #[tokio::test]
    async fn test_unknown_sort_falls_back() {
        let file = catalog_file();
        let args = ["list", "--sort", "popular", "--search", "tour"];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        assert_eq!(out["sort"], "default");
        // matches the agency "Capital Tours" only
        let tours = out["tours"].as_array().unwrap();
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0]["id"], 1);
    }

    #[tokio::test]
    async fn test_details_fallbacks_and_gate() {
        let file = catalog_file();
        let args = ["details", "3", "--book", "--ask-ai"];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        assert_eq!(out["tour"]["itinerary"].as_array().unwrap().len(), 5);
        assert_eq!(out["tour"]["image"]["kind"], "placeholder");
        assert_eq!(out["placement"]["mode"], "centered");
        assert_eq!(out["book"], "authentication_required");
    }

    #[tokio::test]
    async fn test_book_requires_user() {
        let file = catalog_file();
        let args = ["book", "2", "--name", "Ali", "--email", "ali@example.com", "--phone", "0300"];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        assert_eq!(out["status"], "authentication_required");
    }

    #[tokio::test]
    async fn test_book_reports_field_errors() {
        let file = catalog_file();
        let args = [
            "--user", "u1", "book", "2", "--email", "nope", "--phone", "0300", "--party", "0",
        ];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        assert_eq!(out["status"], "invalid");
        assert_eq!(out["errors"]["fullName"], "Full name is required");
        assert_eq!(out["errors"]["email"], "Please enter a valid email");
        assert_eq!(out["errors"]["partySize"], "At least one person is required");
        assert!(out["errors"].get("phone").is_none());
    }

    #[tokio::test]
    async fn test_book_confirms_with_geolocated_pickup() {
        let file = catalog_file();
        let args = [
            "--user", "u1", "book", "2", "--name", "Ali Khan", "--email", "ali@example.com",
            "--phone", "03001234567", "--party", "2", "--lat", "36.31", "--lng", "74.65",
        ];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        assert_eq!(out["status"], "confirmed");
        assert_eq!(out["bookedBy"], "u1");
        let booking = &out["confirmation"]["booking"];
        assert_eq!(booking["status"], "confirmed");
        assert_eq!(booking["pickupLocation"], "Lat: 36.31, Lng: 74.65");
        assert_eq!(booking["email"], "ali@example.com");
        assert_eq!(out["confirmation"]["code"]["state"], "ready");
        assert_eq!(out["event"]["total_price"], 104000);
        assert_eq!(out["event"]["has_code"], true);
    }

    #[tokio::test]
    async fn test_book_with_overflowing_total_still_confirms() {
        let file = catalog_file();
        let args = [
            "--user", "u1", "book", "4", "--name", "Ali Khan", "--email", "ali@example.com",
            "--phone", "03001234567", "--party", "2",
        ];
        let out = run(cli(&file, &args), &Config::default()).await.unwrap();

        assert_eq!(out["status"], "confirmed");
        assert!(out["event"]["total_price"].is_null());
        assert_eq!(out["event"]["number_of_people"], 2);
    }

    #[tokio::test]
    async fn test_missing_catalog_is_an_error() {
        let cli = Cli::parse_from(["tourdesk", "--catalog", "nope.json", "list"]);
        let result = run(cli, &Config::default()).await;
        assert!(result.is_err());
    }
}
