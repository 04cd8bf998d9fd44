//! Spreadsheet schema registered with Copilot for an uploaded CSV file.
//!
//! Column kinds are modelled as a tagged union: a dimension can only carry a
//! dimension type and is always aggregated with `UNIQ`; a metric carries a
//! metric type and one of the metric aggregations. The flat wire triple
//! (`kind`, `type`, `agg`) is derived from the union, and decoding a triple
//! rejects incoherent combinations.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised while assembling a spreadsheet schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpreadsheetValidationError {
    #[error("spreadsheet name must not be empty")]
    EmptyName,
    #[error("spreadsheet must define at least one column")]
    NoColumns,
    #[error("column name must not be empty")]
    EmptyColumnName,
    #[error("column '{name}' is defined more than once")]
    DuplicateColumn { name: String },
    #[error("thousands and decimal separators must differ")]
    SeparatorsCollide,
    #[error("read_from_line is 1-based and must be at least 1")]
    ZeroReadFromLine,
    #[error("column type {column_type:?} is not valid for kind {kind:?}")]
    TypeKindMismatch { kind: ColumnKind, column_type: ColumnType },
    #[error("aggregation {aggregation:?} is not valid for kind {kind:?}")]
    AggregationKindMismatch { kind: ColumnKind, aggregation: AggregationType },
}

/// Number separator accepted by Copilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    #[serde(rename = ".")]
    Dot,
    #[serde(rename = ",")]
    Comma,
}

impl Separator {
    /// Character this separator stands for.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }
}

/// Thousands/decimal separator pair.
///
/// The two separators must differ, otherwise a value such as `1.234` would be
/// ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    thousands: Separator,
    decimal: Separator,
}

impl Separators {
    /// Build a separator pair.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetValidationError::SeparatorsCollide`] when both
    /// separators are the same character.
    pub fn new(thousands: Separator, decimal: Separator) -> Result<Self, SpreadsheetValidationError> {
        if thousands == decimal {
            return Err(SpreadsheetValidationError::SeparatorsCollide);
        }
        Ok(Self { thousands, decimal })
    }

    #[must_use]
    pub const fn thousands(&self) -> Separator {
        self.thousands
    }

    #[must_use]
    pub const fn decimal(&self) -> Separator {
        self.decimal
    }
}

impl Default for Separators {
    /// Continental style: `1.234,56`.
    fn default() -> Self {
        Self {
            thousands: Separator::Dot,
            decimal: Separator::Comma,
        }
    }
}

/// 1-based line of the CSV file where data starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadFromLine(NonZeroU32);

impl ReadFromLine {
    /// Build a line offset.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetValidationError::ZeroReadFromLine`] for `0`.
    pub fn new(line: u32) -> Result<Self, SpreadsheetValidationError> {
        NonZeroU32::new(line)
            .map(Self)
            .ok_or(SpreadsheetValidationError::ZeroReadFromLine)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for ReadFromLine {
    fn default() -> Self {
        Self(NonZeroU32::MIN)
    }
}

/// Wire-level column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnKind {
    Dimension,
    Metric,
}

/// Wire-level column type covering both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    String,
    Date,
    Datetime,
    Bool,
    Money,
    Decimal,
    Integer,
    Percent,
}

/// Wire-level aggregation covering both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    Uniq,
    Sum,
    Count,
    Average,
    Max,
    Min,
    First,
}

/// Types a dimension column may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionType {
    String,
    Date,
    Datetime,
    Bool,
}

/// Types a metric column may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Money,
    Decimal,
    Integer,
    Percent,
}

/// Aggregations a metric column may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricAggregation {
    Sum,
    Count,
    Average,
    Max,
    Min,
    First,
}

impl From<DimensionType> for ColumnType {
    fn from(value: DimensionType) -> Self {
        match value {
            DimensionType::String => Self::String,
            DimensionType::Date => Self::Date,
            DimensionType::Datetime => Self::Datetime,
            DimensionType::Bool => Self::Bool,
        }
    }
}

impl From<MetricType> for ColumnType {
    fn from(value: MetricType) -> Self {
        match value {
            MetricType::Money => Self::Money,
            MetricType::Decimal => Self::Decimal,
            MetricType::Integer => Self::Integer,
            MetricType::Percent => Self::Percent,
        }
    }
}

impl From<MetricAggregation> for AggregationType {
    fn from(value: MetricAggregation) -> Self {
        match value {
            MetricAggregation::Sum => Self::Sum,
            MetricAggregation::Count => Self::Count,
            MetricAggregation::Average => Self::Average,
            MetricAggregation::Max => Self::Max,
            MetricAggregation::Min => Self::Min,
            MetricAggregation::First => Self::First,
        }
    }
}

/// Kind-specific column description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSpec {
    /// Categorical column, always aggregated with `UNIQ`.
    Dimension { data_type: DimensionType },
    /// Numeric column with its own aggregation.
    Metric {
        data_type: MetricType,
        aggregation: MetricAggregation,
    },
}

impl ColumnSpec {
    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Dimension { .. } => ColumnKind::Dimension,
            Self::Metric { .. } => ColumnKind::Metric,
        }
    }

    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match *self {
            Self::Dimension { data_type } => data_type.into(),
            Self::Metric { data_type, .. } => data_type.into(),
        }
    }

    #[must_use]
    pub fn aggregation(&self) -> AggregationType {
        match *self {
            Self::Dimension { .. } => AggregationType::Uniq,
            Self::Metric { aggregation, .. } => aggregation.into(),
        }
    }

    /// Rebuild a spec from its flat wire triple.
    ///
    /// # Errors
    ///
    /// Returns a mismatch error when the type or aggregation is not valid for
    /// the given kind.
    pub fn from_wire(
        kind: ColumnKind,
        column_type: ColumnType,
        aggregation: AggregationType,
    ) -> Result<Self, SpreadsheetValidationError> {
        match kind {
            ColumnKind::Dimension => {
                let data_type = match column_type {
                    ColumnType::String => DimensionType::String,
                    ColumnType::Date => DimensionType::Date,
                    ColumnType::Datetime => DimensionType::Datetime,
                    ColumnType::Bool => DimensionType::Bool,
                    other => {
                        return Err(SpreadsheetValidationError::TypeKindMismatch {
                            kind,
                            column_type: other,
                        });
                    }
                };
                if aggregation != AggregationType::Uniq {
                    return Err(SpreadsheetValidationError::AggregationKindMismatch {
                        kind,
                        aggregation,
                    });
                }
                Ok(Self::Dimension { data_type })
            }
            ColumnKind::Metric => {
                let data_type = match column_type {
                    ColumnType::Money => MetricType::Money,
                    ColumnType::Decimal => MetricType::Decimal,
                    ColumnType::Integer => MetricType::Integer,
                    ColumnType::Percent => MetricType::Percent,
                    other => {
                        return Err(SpreadsheetValidationError::TypeKindMismatch {
                            kind,
                            column_type: other,
                        });
                    }
                };
                let aggregation = match aggregation {
                    AggregationType::Sum => MetricAggregation::Sum,
                    AggregationType::Count => MetricAggregation::Count,
                    AggregationType::Average => MetricAggregation::Average,
                    AggregationType::Max => MetricAggregation::Max,
                    AggregationType::Min => MetricAggregation::Min,
                    AggregationType::First => MetricAggregation::First,
                    AggregationType::Uniq => {
                        return Err(SpreadsheetValidationError::AggregationKindMismatch {
                            kind,
                            aggregation,
                        });
                    }
                };
                Ok(Self::Metric {
                    data_type,
                    aggregation,
                })
            }
        }
    }
}

/// One CSV column as described to Copilot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetColumn {
    /// Disabled columns are ignored by Copilot.
    pub is_enabled: bool,
    /// Must match the CSV header cell exactly.
    pub name: String,
    pub spec: ColumnSpec,
    /// Free-text hint passed to Copilot.
    pub description: String,
}

impl SpreadsheetColumn {
    /// Enabled dimension column.
    pub fn dimension(name: impl Into<String>, data_type: DimensionType) -> Self {
        Self {
            is_enabled: true,
            name: name.into(),
            spec: ColumnSpec::Dimension { data_type },
            description: String::new(),
        }
    }

    /// Enabled metric column.
    pub fn metric(
        name: impl Into<String>,
        data_type: MetricType,
        aggregation: MetricAggregation,
    ) -> Self {
        Self {
            is_enabled: true,
            name: name.into(),
            spec: ColumnSpec::Metric {
                data_type,
                aggregation,
            },
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }
}

/// Spreadsheet schema binding columns to an uploaded file.
///
/// ## Invariants
/// - `name` is non-blank.
/// - At least one column; column names are non-empty and unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spreadsheet {
    name: String,
    separators: Separators,
    read_from_line: ReadFromLine,
    columns: Vec<SpreadsheetColumn>,
}

impl Spreadsheet {
    /// Build a schema with default separators and data starting at line 1.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetValidationError`] when the name is blank, no
    /// columns are supplied, or column names are empty or repeated.
    ///
    /// # Examples
    /// ```
    /// use copilot_portal::domain::{DimensionType, Spreadsheet, SpreadsheetColumn};
    ///
    /// let sheet = Spreadsheet::new(
    ///     "Orders",
    ///     vec![SpreadsheetColumn::dimension("Order ID", DimensionType::String)],
    /// )
    /// .expect("valid schema");
    /// assert_eq!(sheet.read_from_line().get(), 1);
    /// ```
    pub fn new(
        name: impl Into<String>,
        columns: Vec<SpreadsheetColumn>,
    ) -> Result<Self, SpreadsheetValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SpreadsheetValidationError::EmptyName);
        }
        if columns.is_empty() {
            return Err(SpreadsheetValidationError::NoColumns);
        }
        for (index, column) in columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(SpreadsheetValidationError::EmptyColumnName);
            }
            if columns
                .iter()
                .take(index)
                .any(|earlier| earlier.name == column.name)
            {
                return Err(SpreadsheetValidationError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }
        Ok(Self {
            name,
            separators: Separators::default(),
            read_from_line: ReadFromLine::default(),
            columns,
        })
    }

    #[must_use]
    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    #[must_use]
    pub fn with_read_from_line(mut self, read_from_line: ReadFromLine) -> Self {
        self.read_from_line = read_from_line;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn separators(&self) -> Separators {
        self.separators
    }

    #[must_use]
    pub const fn read_from_line(&self) -> ReadFromLine {
        self.read_from_line
    }

    #[must_use]
    pub fn columns(&self) -> &[SpreadsheetColumn] {
        &self.columns
    }

    /// Column names missing from `headers`.
    pub fn missing_columns<'a, S>(&'a self, headers: &[S]) -> Vec<&'a str>
    where
        S: AsRef<str>,
    {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .filter(|name| !headers.iter().any(|header| header.as_ref() == *name))
            .collect()
    }
}

/// Remote identifier of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_id: i64,
}

/// Remote identifier of a registered spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadsheetId(i64);

impl SpreadsheetId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SpreadsheetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    //! Schema construction and wire mapping coverage.

    use super::*;
    use rstest::rstest;

    fn order_id() -> SpreadsheetColumn {
        SpreadsheetColumn::dimension("Order ID", DimensionType::String)
    }

    #[rstest]
    #[case(DimensionType::String, ColumnType::String)]
    #[case(DimensionType::Date, ColumnType::Date)]
    #[case(DimensionType::Datetime, ColumnType::Datetime)]
    #[case(DimensionType::Bool, ColumnType::Bool)]
    fn dimensions_always_aggregate_uniquely(
        #[case] data_type: DimensionType,
        #[case] expected: ColumnType,
    ) {
        let spec = ColumnSpec::Dimension { data_type };
        assert_eq!(spec.kind(), ColumnKind::Dimension);
        assert_eq!(spec.column_type(), expected);
        assert_eq!(spec.aggregation(), AggregationType::Uniq);
    }

    #[rstest]
    #[case(ColumnKind::Metric, ColumnType::Decimal, AggregationType::Sum, true)]
    #[case(ColumnKind::Metric, ColumnType::Percent, AggregationType::First, true)]
    #[case(ColumnKind::Dimension, ColumnType::Date, AggregationType::Uniq, true)]
    #[case(ColumnKind::Dimension, ColumnType::Money, AggregationType::Uniq, false)]
    #[case(ColumnKind::Dimension, ColumnType::String, AggregationType::Sum, false)]
    #[case(ColumnKind::Metric, ColumnType::Bool, AggregationType::Sum, false)]
    #[case(ColumnKind::Metric, ColumnType::Integer, AggregationType::Uniq, false)]
    fn wire_triples_are_checked_for_coherence(
        #[case] kind: ColumnKind,
        #[case] column_type: ColumnType,
        #[case] aggregation: AggregationType,
        #[case] coherent: bool,
    ) {
        let result = ColumnSpec::from_wire(kind, column_type, aggregation);
        assert_eq!(result.is_ok(), coherent, "{result:?}");
        if let Ok(spec) = result {
            assert_eq!(spec.kind(), kind);
            assert_eq!(spec.column_type(), column_type);
            assert_eq!(spec.aggregation(), aggregation);
        }
    }

    #[test]
    fn separators_must_differ() {
        assert_eq!(
            Separators::new(Separator::Comma, Separator::Comma),
            Err(SpreadsheetValidationError::SeparatorsCollide)
        );
        let separators = Separators::new(Separator::Comma, Separator::Dot).expect("distinct");
        assert_eq!(separators.thousands().as_char(), ',');
        assert_eq!(separators.decimal().as_char(), '.');
    }

    #[test]
    fn default_separators_are_dot_then_comma() {
        let separators = Separators::default();
        assert_eq!(separators.thousands(), Separator::Dot);
        assert_eq!(separators.decimal(), Separator::Comma);
    }

    #[test]
    fn read_from_line_is_one_based() {
        assert_eq!(
            ReadFromLine::new(0),
            Err(SpreadsheetValidationError::ZeroReadFromLine)
        );
        assert_eq!(ReadFromLine::default().get(), 1);
    }

    #[rstest]
    #[case("", vec![order_id()], SpreadsheetValidationError::EmptyName)]
    #[case("Orders", vec![], SpreadsheetValidationError::NoColumns)]
    #[case(
        "Orders",
        vec![SpreadsheetColumn::dimension("", DimensionType::String)],
        SpreadsheetValidationError::EmptyColumnName
    )]
    #[case(
        "Orders",
        vec![order_id(), order_id()],
        SpreadsheetValidationError::DuplicateColumn { name: "Order ID".to_owned() }
    )]
    fn rejects_malformed_schemas(
        #[case] name: &str,
        #[case] columns: Vec<SpreadsheetColumn>,
        #[case] expected: SpreadsheetValidationError,
    ) {
        assert_eq!(Spreadsheet::new(name, columns), Err(expected));
    }

    #[test]
    fn reports_columns_missing_from_headers() {
        let sheet = Spreadsheet::new(
            "Orders",
            vec![
                order_id(),
                SpreadsheetColumn::metric("Price", MetricType::Decimal, MetricAggregation::Sum),
            ],
        )
        .expect("valid schema");

        assert!(sheet.missing_columns(&["Order ID", "Price", "Extra"]).is_empty());
        assert_eq!(sheet.missing_columns(&["Order ID"]), vec!["Price"]);
    }

    #[test]
    fn spreadsheet_id_parses_form_input() {
        let id: SpreadsheetId = " 42 ".parse().expect("numeric id");
        assert_eq!(id, SpreadsheetId::new(42));
        assert!("abc".parse::<SpreadsheetId>().is_err());
    }
}
