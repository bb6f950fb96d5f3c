use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Str,
    Int,
    Year,
    Month,
    Day,
    Url,
    RequiredStr,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Str => "str",
            ColumnType::Int => "int",
            ColumnType::Year => "year",
            ColumnType::Month => "month",
            ColumnType::Day => "day",
            ColumnType::Url => "url",
            ColumnType::RequiredStr => "required str",
        }
    }

    /// Default display width used when rendering a column
    pub fn default_width(&self) -> usize {
        match self {
            ColumnType::Year => 6,
            ColumnType::Month | ColumnType::Day => 5,
            ColumnType::Int => 6,
            ColumnType::Url | ColumnType::RequiredStr => 24,
            ColumnType::Str => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub col_type: ColumnType,
    pub width: usize,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
            width: col_type.default_width(),
        }
    }

    /// Plain string column, used for headers outside the known vocabulary
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Str)
    }

    pub fn is_mailing(&self) -> bool {
        crate::lst::header::is_mailing_header(&self.name)
    }
}
