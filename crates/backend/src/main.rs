use anyhow::Context;
use backend::dashboards::d400_yearly_revenue::YearlyRevenueView;
use backend::dashboards::d401_country_sales::{
    aggregate_by_country_year, country_ranking, country_trend_series, CountrySalesView,
};
use backend::dashboards::d402_revenue_calendar::RevenueCalendarView;
use backend::dashboards::d403_logistics_flow::LogisticsFlowView;
use backend::domain::a002_geo_boundary::reconcile_geography;
use backend::shared::config::{load_config_from, resolve_data_path, Config};
use backend::shared::data::loader::{is_remote, load_boundaries, load_sales};
use backend::shared::format::format_number;
use backend::shared::logger::{self, init_tracing};
use backend::shared::session::DashboardSession;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "sales-dashboard",
    about = "Sales dashboard aggregates from an e-commerce CSV",
    version
)]
struct Cli {
    /// Path to config.toml (defaults to the one next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Sales CSV, overrides [data].sales_csv
    #[arg(long, global = true)]
    data: Option<String>,
    /// Boundary GeoJSON path or URL, overrides [data].boundaries
    #[arg(long, global = true)]
    geo: Option<String>,
    /// Filter state as a URL query, e.g. "year=2024&provider=DHL&country=All"
    #[arg(long, global = true, default_value = "")]
    query: String,
    #[arg(long, global = true, default_value = "target/logs")]
    log_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Row counts of the normalizer
    ImportReport,
    #[command(flatten)]
    Dashboard(DashboardCommand),
}

#[derive(Subcommand)]
enum DashboardCommand {
    /// Revenue per year
    Yearly,
    /// Revenue ranking for one year, or per-country trend series
    Countries {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Units sold per map feature
    Choropleth,
    /// Daily revenue heatmap
    Calendar,
    /// Warehouse → provider → country graph
    Flow,
}

/// Rendered dashboard panel
#[derive(Serialize)]
struct Panel<T: Serialize> {
    title: String,
    query: String,
    #[serde(rename = "noData", skip_serializing_if = "Option::is_none")]
    no_data: Option<String>,
    data: T,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_dir)?;

    let config = load_config_from(cli.config.as_deref())?;
    let sales_path = resolve_data_path(cli.data.as_deref().unwrap_or(&config.data.sales_csv));
    let geo_source = cli.geo.clone().unwrap_or_else(|| config.data.boundaries.clone());
    let geo_source = if is_remote(&geo_source) {
        geo_source
    } else {
        resolve_data_path(&geo_source).display().to_string()
    };

    let (sales, boundaries) = tokio::join!(load_sales(&sales_path), load_boundaries(&geo_source));
    let sales = sales.with_context(|| format!("failed to load {}", sales_path.display()))?;
    let mut boundaries = boundaries.with_context(|| format!("failed to load {}", geo_source))?;

    let renamed = reconcile_geography(&mut boundaries, &config.geography.aliases);
    logger::log(
        "startup",
        &format!(
            "{} records, {} boundary features ({} renamed)",
            format_number(sales.records.len()),
            format_number(boundaries.features.len()),
            renamed
        ),
    );

    match cli.command {
        Commands::ImportReport => print_json(&sales.report),
        Commands::Dashboard(command) => {
            let mut session = DashboardSession::from_query(
                Arc::new(sales.records),
                Arc::new(boundaries),
                &cli.query,
                config.filters.default_year,
            )?;
            render(command, &mut session, &config)
        }
    }
}

fn render(
    command: DashboardCommand,
    session: &mut DashboardSession,
    config: &Config,
) -> anyhow::Result<()> {
    let query = session.query_string().to_string();

    match command {
        DashboardCommand::Yearly => {
            let id = session.register(Box::new(YearlyRevenueView::new()));
            let view = session
                .view_as::<YearlyRevenueView>(id)
                .context("yearly view not registered")?;
            print_json(&Panel {
                title: view.title(),
                query,
                no_data: view.no_data_message(),
                data: &view.data,
            })
        }
        DashboardCommand::Countries { year } => {
            let provider = &session.filter().provider;
            let scoped = session
                .records()
                .iter()
                .filter(|r| provider.matches(&r.shipment_provider));
            let aggregates = aggregate_by_country_year(scoped);
            match year {
                Some(year) => print_json(&Panel {
                    title: format!("Revenue by country in {}", year),
                    query,
                    no_data: None,
                    data: country_ranking(&aggregates, year),
                }),
                None => print_json(&Panel {
                    title: "Revenue trend by country".to_string(),
                    query,
                    no_data: None,
                    data: country_trend_series(&aggregates),
                }),
            }
        }
        DashboardCommand::Choropleth => {
            let id = session.register(Box::new(CountrySalesView::new()));
            let view = session
                .view_as::<CountrySalesView>(id)
                .context("country view not registered")?;
            print_json(&Panel {
                title: view.legend_title(),
                query,
                no_data: view.no_data_message(),
                data: &view.map,
            })
        }
        DashboardCommand::Calendar => {
            let id = session.register(Box::new(RevenueCalendarView::new(config.calendar)));
            let view = session
                .view_as::<RevenueCalendarView>(id)
                .context("calendar view not registered")?;
            print_json(&Panel {
                title: view.title(),
                query,
                no_data: view.no_data_message(),
                data: &view.days,
            })
        }
        DashboardCommand::Flow => {
            let id = session.register(Box::new(LogisticsFlowView::new(config.flow.node_identity)));
            let view = session
                .view_as::<LogisticsFlowView>(id)
                .context("flow view not registered")?;
            print_json(&Panel {
                title: "Shipment flow".to_string(),
                query,
                no_data: view.no_data_message(),
                data: &view.graph,
            })
        }
    }
}
