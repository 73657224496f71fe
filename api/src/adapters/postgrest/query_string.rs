//! PostgREST query-string encoding
//!
//! `eq` filters become `field=eq.value` and `in` filters become
//! `field=in.("a","b")`. Every `in` member is double-quoted so values that
//! contain commas or parentheses survive; quotes and backslashes inside a
//! value are escaped.

use urlencoding::encode;

use crate::domain::ports::{Filter, Query};

/// Encode the select list and filters of `query`
pub fn encode_query(query: &Query) -> String {
    let columns: String = query
        .columns
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut params = vec![format!("select={}", encode(&columns))];
    params.extend(query.filters.iter().map(encode_filter));
    params.join("&")
}

fn encode_filter(filter: &Filter) -> String {
    match filter {
        Filter::Eq { field, value } => {
            format!("{}=eq.{}", encode(field), encode(value))
        }
        Filter::In { field, values } => {
            let members: Vec<String> = values.iter().map(|v| quote(v)).collect();
            format!("{}=in.{}", encode(field), encode(&format!("({})", members.join(","))))
        }
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
