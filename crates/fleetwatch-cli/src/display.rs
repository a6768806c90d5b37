//! Terminal rendering for alerts, dashboards and sources.
//!
//! Alerts are rendered from the Arrow alert batch: either one vertical card
//! per row, grouped by section, or Arrow's pretty-printed table.

use arrow::array::{Array, ListArray, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use fleetwatch_core::RegulatorySource;
use fleetwatch_engine::{Answer, DashboardSummary};

const MAX_LIST_ITEMS: usize = 10;

// ── Card sections ──

const IDENTITY: &[&str] = &["id", "body", "source_url"];

const CLASSIFICATION: &[&str] = &["severity", "status", "category", "species", "zone"];

const DATES: &[&str] = &["published_date", "action_deadline"];

const VESSELS: &[&str] = &["affected_vessels"];

// ── Public API ──

/// Print every row of an alert batch as a card.
pub fn print_alert_cards(batch: &RecordBatch) {
    if batch.num_rows() == 0 {
        println!("No alerts.");
        return;
    }
    for row in 0..batch.num_rows() {
        print_alert_card(batch, row);
    }
}

/// Print one alert row as a vertical card grouped by section.
pub fn print_alert_card(batch: &RecordBatch, row: usize) {
    let id = get_utf8(batch, "id", row).unwrap_or_default();
    let title = get_utf8(batch, "title", row).unwrap_or_default();

    println!("=== {id} ===");
    if !title.is_empty() {
        println!("{title}");
    }
    println!();

    print_section(batch, row, "Identity", IDENTITY);
    print_section(batch, row, "Classification", CLASSIFICATION);
    print_section(batch, row, "Dates", DATES);
    print_section(batch, row, "Vessels", VESSELS);
}

/// Print the whole batch as an ASCII table.
pub fn print_alert_table(batch: &RecordBatch) -> anyhow::Result<()> {
    let table = arrow::util::pretty::pretty_format_batches(std::slice::from_ref(batch))?;
    println!("{table}");
    Ok(())
}

pub fn print_answer(answer: &Answer) {
    println!("{}", answer.text);
    if !answer.sources.is_empty() {
        let ids: Vec<&str> = answer.sources.iter().map(|a| a.id.as_str()).collect();
        println!();
        println!("Sources: {}", ids.join(", "));
    }
}

pub fn print_dashboard(summary: &DashboardSummary) {
    println!("=== Dashboard ({}) ===", summary.as_of);
    println!();
    println!("Alerts");
    println!("  {:<26} {}", "total", summary.total_alerts);
    println!("  {:<26} {}", "critical", summary.critical);
    println!("  {:<26} {}", "warning", summary.warning);
    println!("  {:<26} {}", "info", summary.info);
    println!("  {:<26} {}", "action required", summary.action_required);
    println!("  {:<26} {}", "overdue", summary.overdue);
    if let Some(next) = summary.next_deadline {
        println!("  {:<26} {}", "next deadline", next);
    }
    println!();

    if !summary.by_category.is_empty() {
        println!("By category");
        for (category, count) in &summary.by_category {
            let label = format!("{} {}", category.icon(), category.label());
            println!("  {:<26} {}", label, count);
        }
        println!();
    }

    println!("Vessels");
    println!("  {:<26} {}", "total", summary.vessels);
    println!("  {:<26} {}", "at risk", summary.vessels_at_risk);
    println!("  {:<26} {}", "action needed", summary.vessels_action_needed);
    println!("  {:<26} {}", "compliant", summary.vessels_compliant);
    println!();

    println!("Sources");
    println!(
        "  {:<26} {} of {}",
        "online", summary.sources_online, summary.sources_total
    );
}

pub fn print_sources(sources: &[RegulatorySource]) {
    if sources.is_empty() {
        println!("No regulatory sources.");
        return;
    }
    for s in sources {
        let last = s
            .last_published
            .map_or_else(|| "never".to_string(), |d| d.to_string());
        println!(
            "{:<8} {:<9} {:>4} docs  last {:<10}  {}",
            s.code,
            s.status.as_str(),
            s.document_count,
            last,
            s.name
        );
    }
}

// ── Section rendering ──

fn print_section(batch: &RecordBatch, row: usize, header: &str, cols: &[&str]) {
    // Skip sections with nothing to show for this row.
    let has_data = cols.iter().any(|&col| {
        batch
            .schema()
            .index_of(col)
            .ok()
            .is_some_and(|i| !batch.column(i).is_null(row))
    });
    if !has_data {
        return;
    }

    println!("{header}");
    let schema = batch.schema();
    for &col_name in cols {
        let Ok(idx) = schema.index_of(col_name) else {
            continue;
        };
        let col = batch.column(idx);
        if col.is_null(row) {
            continue;
        }

        match schema.field(idx).data_type() {
            DataType::Utf8 => {
                if let Some(value) = col_str(col.as_ref(), row) {
                    println!("  {:<26} {}", col_name, value);
                }
            }
            DataType::List(inner) if inner.data_type() == &DataType::Utf8 => {
                print_list_utf8(col.as_ref(), row, col_name);
            }
            _ => {
                // Dates and anything else go through Arrow's formatter.
                match ArrayFormatter::try_new(col.as_ref(), &FormatOptions::default()) {
                    Ok(fmt) => println!("  {:<26} {}", col_name, fmt.value(row)),
                    Err(_) => println!("  {:<26} ({})", col_name, col.data_type()),
                }
            }
        }
    }
    println!();
}

// ── List<Utf8> ──

fn print_list_utf8(col: &dyn Array, row: usize, col_name: &str) {
    let Some(list) = col.as_any().downcast_ref::<ListArray>() else {
        return;
    };
    let values = list.value(row);
    let Some(strings) = values.as_any().downcast_ref::<StringArray>() else {
        return;
    };
    let items: Vec<&str> = (0..strings.len())
        .filter(|&i| !strings.is_null(i))
        .map(|i| strings.value(i))
        .collect();
    if items.is_empty() {
        println!("  {:<26} none assigned", col_name);
        return;
    }

    let shown = items.len().min(MAX_LIST_ITEMS);
    print!("  {:<26} {}", col_name, items[..shown].join(", "));
    if items.len() > MAX_LIST_ITEMS {
        print!(" ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    println!();
}

// ── Helpers ──

fn get_utf8(batch: &RecordBatch, col_name: &str, row: usize) -> Option<String> {
    let idx = batch.schema().index_of(col_name).ok()?;
    col_str(batch.column(idx).as_ref(), row).map(str::to_string)
}

fn col_str(col: &dyn Array, i: usize) -> Option<&str> {
    if col.is_null(i) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|a| a.value(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleetwatch_core::alerts::alerts_to_batch;
    use fleetwatch_core::{Alert, AlertCategory, AlertStatus, Severity};

    fn alert() -> Alert {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        Alert {
            id: "iotc-1".into(),
            severity: Severity::Critical,
            status: AlertStatus::ActionRequired,
            category: AlertCategory::Quota,
            title: "Yellowfin Tuna Quota Cut".into(),
            summary: String::new(),
            body: "IOTC".into(),
            species: "Yellowfin Tuna".into(),
            zone: "Indian Ocean".into(),
            effective_date: date,
            published_date: date,
            affected_vessels: vec!["Ocean Harvester".into()],
            action_deadline: date,
            change_detail: String::new(),
            source_url: None,
        }
    }

    #[test]
    fn reads_cells_by_name() {
        let batch = alerts_to_batch(&[alert()]).unwrap();
        assert_eq!(get_utf8(&batch, "id", 0).as_deref(), Some("iotc-1"));
        assert_eq!(get_utf8(&batch, "source_url", 0), None);
        assert_eq!(get_utf8(&batch, "no_such_column", 0), None);
    }

    #[test]
    fn table_formats() {
        let batch = alerts_to_batch(&[alert()]).unwrap();
        print_alert_table(&batch).unwrap();
        print_alert_cards(&batch);
    }
}
