/// Arrow schema and batch export for canonical alerts.
pub mod alerts {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Date32Array, ListBuilder, StringArray, StringBuilder};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::dates::days_since_epoch;
    use crate::model::Alert;

    /// Schema for the tabular alert view.
    pub fn alert_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("body", DataType::Utf8, false),
            Field::new("severity", DataType::Utf8, false),
            Field::new("status", DataType::Utf8, false),
            Field::new("category", DataType::Utf8, false),
            Field::new("title", DataType::Utf8, false),
            Field::new("zone", DataType::Utf8, false),
            Field::new("species", DataType::Utf8, false),
            Field::new("published_date", DataType::Date32, false),
            Field::new("action_deadline", DataType::Date32, false),
            Field::new(
                "affected_vessels",
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
                false,
            ),
            Field::new("source_url", DataType::Utf8, true),
        ])
    }

    /// Build one RecordBatch holding every alert, in input order.
    pub fn alerts_to_batch(alerts: &[Alert]) -> Result<RecordBatch, ArrowError> {
        let mut vessels = ListBuilder::new(StringBuilder::new());
        for alert in alerts {
            for name in &alert.affected_vessels {
                vessels.values().append_value(name);
            }
            vessels.append(true);
        }

        let columns: Vec<ArrayRef> = vec![
            utf8_column(alerts, |a| &a.id),
            utf8_column(alerts, |a| &a.body),
            utf8_column(alerts, |a| a.severity.as_str()),
            utf8_column(alerts, |a| a.status.as_str()),
            utf8_column(alerts, |a| a.category.as_str()),
            utf8_column(alerts, |a| &a.title),
            utf8_column(alerts, |a| &a.zone),
            utf8_column(alerts, |a| &a.species),
            Arc::new(Date32Array::from_iter_values(
                alerts.iter().map(|a| days_since_epoch(a.published_date)),
            )),
            Arc::new(Date32Array::from_iter_values(
                alerts.iter().map(|a| days_since_epoch(a.action_deadline)),
            )),
            Arc::new(vessels.finish()),
            Arc::new(StringArray::from(
                alerts
                    .iter()
                    .map(|a| a.source_url.clone())
                    .collect::<Vec<_>>(),
            )),
        ];

        RecordBatch::try_new(Arc::new(alert_schema()), columns)
    }

    fn utf8_column<F>(alerts: &[Alert], f: F) -> ArrayRef
    where
        F: Fn(&Alert) -> &str,
    {
        Arc::new(StringArray::from_iter_values(alerts.iter().map(f)))
    }
}
