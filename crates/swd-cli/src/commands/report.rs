use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use uuid::Uuid;

use swd_config::{LoadedConfig, ReportSettings};
use swd_reconcile::MatchStrategy;
use swd_report::{build_report, ReconciliationReport, ReportInput};
use swd_schemas::{Catalog, ExternalTicketItem, Order};
use swd_stats::ChannelSets;

pub struct RunArgs {
    pub orders_path: String,
    pub tickets_path: String,
    pub catalog_path: Option<String>,
    pub config_paths: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub out_path: Option<String>,
    pub csv_path: Option<String>,
}

/// Report artifact envelope: which run, when, under which configuration.
#[derive(Serialize)]
struct ReportEnvelope<'a> {
    report_id: Uuid,
    generated_at: DateTime<Utc>,
    resort_id: &'a str,
    config_hash: &'a str,
    report: &'a ReconciliationReport,
}

pub fn run(args: RunArgs) -> Result<()> {
    let loaded = load_config(&args.config_paths)?;
    let settings = loaded.settings()?;

    let mut orders: Vec<Order> = read_json(&args.orders_path).context("load orders")?;
    let mut tickets: Vec<ExternalTicketItem> =
        read_json(&args.tickets_path).context("load tickets")?;
    let catalog: Catalog = match &args.catalog_path {
        Some(p) => read_json(p).context("load catalog")?,
        None => Catalog::empty(),
    };

    let from = parse_bound(args.from.as_deref()).context("invalid --from")?;
    let to = parse_bound(args.to.as_deref()).context("invalid --to")?;
    filter_window(&mut orders, &mut tickets, &settings, from, to);

    let channels = ChannelSets {
        online: settings.channels.online.clone(),
        kiosk: settings.channels.kiosk.clone(),
    };
    let report = build_report(ReportInput {
        orders: &orders,
        tickets: &tickets,
        catalog: &catalog,
        channels,
    });

    for diag in &report.diags {
        tracing::warn!(?diag, "reconciliation diagnostic");
    }

    print_summary(&loaded, &settings, &report);

    if let Some(path) = &args.out_path {
        let envelope = ReportEnvelope {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            resort_id: settings.resort_id.as_str(),
            config_hash: loaded.config_hash.as_str(),
            report: &report,
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        fs::write(path, json).with_context(|| format!("write report json: {path}"))?;
        println!("report_written=true path={path}");
    }

    if let Some(path) = &args.csv_path {
        write_items_csv(path, &report)?;
        println!("csv_written=true path={path}");
    }

    Ok(())
}

fn load_config(paths: &[String]) -> Result<LoadedConfig> {
    if paths.is_empty() {
        return swd_config::load_layered_yaml_from_strings(&["{}"]);
    }
    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    swd_config::load_layered_yaml(&refs)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let s = fs::read_to_string(path).with_context(|| format!("read: {path}"))?;
    serde_json::from_str(&s).with_context(|| format!("parse json: {path}"))
}

fn parse_bound(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(s) => {
            let dt = DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("not an RFC 3339 timestamp: {s}"))?;
            Ok(Some(dt.with_timezone(&Utc)))
        }
    }
}

/// Restrict the inputs to the resort and half-open window [from, to).
fn filter_window(
    orders: &mut Vec<Order>,
    tickets: &mut Vec<ExternalTicketItem>,
    settings: &ReportSettings,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) {
    let in_window = |at: DateTime<Utc>| {
        from.map(|f| at >= f).unwrap_or(true) && to.map(|t| at < t).unwrap_or(true)
    };
    orders.retain(|o| {
        (settings.resort_id.is_empty() || o.resort_id == settings.resort_id)
            && in_window(o.created_at)
    });
    tickets.retain(|t| in_window(t.issued_at));
}

fn print_summary(loaded: &LoadedConfig, settings: &ReportSettings, report: &ReconciliationReport) {
    let t = &report.totals;
    println!("config_hash={}", loaded.config_hash);
    if !settings.resort_id.is_empty() {
        println!("resort_id={}", settings.resort_id);
    }
    println!("items={}", report.items.len());
    println!(
        "live matched={} only_internal={} only_skidata={} missing_device={}",
        t.recon_live.matched,
        t.recon_live.only_internal,
        t.recon_live.only_skidata,
        t.recon_live.missing_device
    );
    println!(
        "test matched={} only_internal={} only_skidata={} missing_device={}",
        t.recon_test.matched,
        t.recon_test.only_internal,
        t.recon_test.only_skidata,
        t.recon_test.missing_device
    );
    println!(
        "revenue_live items={} skipass_gross_cents={} skipass_tax_cents={} lifepass_gross_cents={} lifepass_tax_cents={} insurance_gross_cents={} insurance_tax_cents={}",
        t.revenue_live.total_items,
        t.revenue_live.skipass_gross_cents,
        t.revenue_live.skipass_tax_cents,
        t.revenue_live.lifepass_gross_cents,
        t.revenue_live.lifepass_tax_cents,
        t.revenue_live.insurance_gross_cents,
        t.revenue_live.insurance_tax_cents
    );
    println!(
        "channel_online items={} skipass_gross_cents={} stripe_amount_cents={} stripe_txn={}",
        t.online.item_count,
        t.online.skipass_gross_cents,
        t.online.stripe.amount_cents,
        t.online.stripe.transaction_count
    );
    println!(
        "channel_kiosk items={} skipass_gross_cents={} stripe_amount_cents={} stripe_txn={}",
        t.kiosk.item_count,
        t.kiosk.skipass_gross_cents,
        t.kiosk.stripe.amount_cents,
        t.kiosk.stripe.transaction_count
    );
    println!("diagnostics={}", report.diags.len());
}

fn write_items_csv(path: &str, report: &ReconciliationReport) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("open csv: {path}"))?;
    w.write_record([
        "status",
        "order_id",
        "has_order_id",
        "strategy",
        "created_at",
        "sales_channel",
        "product_id",
        "product_name",
        "consumer_category_id",
        "consumer_category_name",
        "skipass_gross_cents",
        "skipass_tax_cents",
        "lifepass_gross_cents",
        "lifepass_tax_cents",
        "insurance_gross_cents",
        "insurance_tax_cents",
        "dta_serial",
        "skidata_serial",
        "settlement_amount_cents",
        "test_order",
    ])?;

    for item in &report.items {
        let r = &item.record;
        let strategy = match item.strategy {
            Some(MatchStrategy::Serial) => "serial",
            Some(MatchStrategy::OrderFallback) => "order-fallback",
            None => "",
        }
        .to_string();
        w.write_record([
            item.status.as_str().to_string(),
            r.order_id.clone(),
            item.has_order_id.to_string(),
            strategy,
            r.created_at.to_rfc3339(),
            r.sales_channel.clone(),
            r.product_id.clone(),
            r.product_name.clone().unwrap_or_default(),
            r.consumer_category_id.clone(),
            r.consumer_category_name.clone().unwrap_or_default(),
            r.skipass_gross_cents.to_string(),
            r.skipass_tax_cents.to_string(),
            r.lifepass_gross_cents.to_string(),
            r.lifepass_tax_cents.to_string(),
            r.insurance_gross_cents.to_string(),
            r.insurance_tax_cents.to_string(),
            r.dta_serial.clone(),
            r.skidata_serial.clone().unwrap_or_default(),
            r.settlement
                .as_ref()
                .map(|s| s.amount_cents.to_string())
                .unwrap_or_default(),
            r.test_order.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
