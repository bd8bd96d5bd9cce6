/*!
Closed value domains accepted by calibredb options.

Every enum carries calibredb's exact spelling (`as_str`), which is also its
clap value name and serde representation, so the CLI, JSON bodies and the
emitted flag all agree.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[value(name = $text)]
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            pub const fn variants() -> &'static [$name] {
                &[ $( $name::$variant, )+ ]
            }

            /// Case-insensitive lookup by calibredb spelling.
            pub fn from_str_ci(s: &str) -> Option<Self> {
                let norm = s.trim().to_ascii_lowercase();
                Self::variants().iter().copied().find(|v| v.as_str() == norm)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// What `add` does with books that look like duplicates.
    Automerge {
        Disabled => "disabled",
        /// Discard duplicate formats
        Ignore => "ignore",
        /// Overwrite duplicate formats in the library
        Overwrite => "overwrite",
        /// Put duplicate formats into a new book record
        NewRecord => "new_record",
    }
}

choice_enum! {
    /// CSV dialect for `list_categories --csv`.
    Dialect {
        Excel => "excel",
        ExcelTab => "excel-tab",
        Unix => "unix",
    }
}

choice_enum! {
    /// Datatype of a custom column.
    ColumnType {
        Bool => "bool",
        Comments => "comments",
        Composite => "composite",
        Datetime => "datetime",
        Enumeration => "enumeration",
        Float => "float",
        Int => "int",
        Rating => "rating",
        Series => "series",
        Text => "text",
    }
}

choice_enum! {
    FtsAction {
        Enable => "enable",
        Disable => "disable",
        Status => "status",
        Reindex => "reindex",
    }
}

choice_enum! {
    IndexingSpeed {
        Fast => "fast",
        Slow => "slow",
    }
}

choice_enum! {
    /// Result format of `fts_search`.
    OutputFormat {
        Text => "text",
        Json => "json",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_matches_calibredb() {
        assert_eq!(Automerge::NewRecord.as_str(), "new_record");
        assert_eq!(Dialect::ExcelTab.to_string(), "excel-tab");
        assert_eq!(ColumnType::Datetime.as_str(), "datetime");
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(FtsAction::from_str_ci(" Reindex "), Some(FtsAction::Reindex));
        assert_eq!(IndexingSpeed::from_str_ci("FAST"), Some(IndexingSpeed::Fast));
        assert_eq!(ColumnType::from_str_ci("invalid_type"), None);
    }

    #[test]
    fn serde_uses_calibredb_spelling() {
        let v = serde_json::to_value(Automerge::NewRecord).unwrap();
        assert_eq!(v, serde_json::json!("new_record"));
        let d: Dialect = serde_json::from_value(serde_json::json!("excel-tab")).unwrap();
        assert_eq!(d, Dialect::ExcelTab);
    }

    #[test]
    fn clap_value_names_match() {
        use clap::ValueEnum;
        let pv = OutputFormat::Json.to_possible_value().unwrap();
        assert_eq!(pv.get_name(), "json");
        let pv = Automerge::NewRecord.to_possible_value().unwrap();
        assert_eq!(pv.get_name(), "new_record");
    }
}
