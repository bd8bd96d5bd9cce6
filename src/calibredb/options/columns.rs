//! Custom column management.

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::calibredb::choices::ColumnType;
use crate::calibredb::schema::{CommandOptions, Field};

/// `calibredb add_custom_column [options] label name datatype`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AddCustomColumnOptions {
    /// Machine-friendly column label (no spaces or colons)
    #[arg(value_name = "LABEL", default_value = "", hide_default_value = true)]
    pub label: String,

    /// Human-friendly column name
    #[arg(value_name = "NAME", default_value = "", hide_default_value = true)]
    pub name: String,

    #[arg(value_name = "DATATYPE", value_enum)]
    pub datatype: Option<ColumnType>,

    /// Column stores tag-like data (only for text columns)
    #[arg(long, value_name = "BOOL")]
    pub is_multiple: Option<bool>,

    /// JSON dictionary of display options
    #[arg(long, default_value = "", hide_default_value = true)]
    pub display: String,
}

impl CommandOptions for AddCustomColumnOptions {
    const COMMAND: &'static str = "add_custom_column";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("label", &self.label).required(),
            Field::arg("name", &self.name).required(),
            Field::arg("datatype", self.datatype.map_or("", ColumnType::as_str)).required(),
            Field::switch("is-multiple", self.is_multiple),
            Field::text("display", &self.display),
        ]
    }
}

/// `calibredb custom_columns [options]`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CustomColumnsOptions {
    /// Show details for each column
    #[arg(long, value_name = "BOOL")]
    pub details: Option<bool>,
}

impl CommandOptions for CustomColumnsOptions {
    const COMMAND: &'static str = "custom_columns";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::switch("details", self.details)]
    }
}

/// `calibredb remove_custom_column [options] label`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RemoveCustomColumnOptions {
    #[arg(value_name = "LABEL", default_value = "", hide_default_value = true)]
    pub label: String,

    /// Do not ask for confirmation
    #[arg(long, value_name = "BOOL")]
    pub force: Option<bool>,
}

impl CommandOptions for RemoveCustomColumnOptions {
    const COMMAND: &'static str = "remove_custom_column";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("label", &self.label).required(),
            Field::switch("force", self.force),
        ]
    }
}

/// `calibredb set_custom [options] column id value`
#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SetCustomOptions {
    #[arg(value_name = "COLUMN", default_value = "", hide_default_value = true)]
    pub column: String,

    #[arg(value_name = "ID", default_value = "", hide_default_value = true)]
    pub id: String,

    #[arg(value_name = "VALUE", default_value = "", hide_default_value = true)]
    pub value: String,

    /// Append to a multiple-valued column instead of replacing
    #[arg(long, value_name = "BOOL")]
    pub append: Option<bool>,
}

impl CommandOptions for SetCustomOptions {
    const COMMAND: &'static str = "set_custom";

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::arg("column", &self.column).required(),
            Field::arg("id", &self.id).required(),
            Field::arg("value", &self.value).required(),
            Field::switch("append", self.append),
        ]
    }
}
