//! The fixed "Orders" dataset schema served by the page.

use super::{
    DimensionType, MetricAggregation, MetricType, Spreadsheet, SpreadsheetColumn,
    SpreadsheetValidationError,
};

/// Spreadsheet and chat name.
pub const ORDERS_NAME: &str = "Orders";

/// Schema of `files/orders.csv`.
///
/// # Errors
///
/// Never fails for the built-in columns; the `Result` mirrors
/// [`Spreadsheet::new`].
pub fn orders_spreadsheet() -> Result<Spreadsheet, SpreadsheetValidationError> {
    Spreadsheet::new(
        ORDERS_NAME,
        vec![
            SpreadsheetColumn::dimension("Date", DimensionType::String)
                .with_description("Date when order was created"),
            SpreadsheetColumn::dimension("Order ID", DimensionType::String)
                .with_description("ID on an order"),
            SpreadsheetColumn::dimension("Customer Email", DimensionType::String),
            SpreadsheetColumn::metric("Price", MetricType::Decimal, MetricAggregation::Sum)
                .with_description("Price in USD dollars"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AggregationType, ColumnKind, ColumnType, Separator};

    #[test]
    fn orders_schema_matches_the_csv_layout() {
        let sheet = orders_spreadsheet().expect("built-in schema");
        let names: Vec<_> = sheet.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Date", "Order ID", "Customer Email", "Price"]);
        assert_eq!(sheet.separators().thousands(), Separator::Dot);
        assert_eq!(sheet.separators().decimal(), Separator::Comma);
        assert_eq!(sheet.read_from_line().get(), 1);
    }

    #[test]
    fn price_is_the_only_metric() {
        let sheet = orders_spreadsheet().expect("built-in schema");
        let metrics: Vec<_> = sheet
            .columns()
            .iter()
            .filter(|c| c.spec.kind() == ColumnKind::Metric)
            .collect();
        assert_eq!(metrics.len(), 1);
        let price = metrics.first().expect("price column");
        assert_eq!(price.name, "Price");
        assert_eq!(price.spec.column_type(), ColumnType::Decimal);
        assert_eq!(price.spec.aggregation(), AggregationType::Sum);
        assert!(sheet.columns().iter().all(|c| c.is_enabled));
    }
}
