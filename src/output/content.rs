//
//  cms-client
//  output/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table rendering for content models.

use console::style;
use serde_json::Value;

use super::{format_bool, format_size, format_state, or_dash, print_field, print_opt_field, truncate};
use super::{TableOutput, TableRow};
use crate::api::content::{Asset, Collection, Entry, Project};

/// Renders a JSON field value on one line. Strings are shown unquoted.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn print_title(title: &str, color: bool) {
    if color {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
    println!();
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_title(self.name.as_deref().unwrap_or("Project"), color);
        print_opt_field("ID", self.id.as_deref(), color);
        print_opt_field("Description", self.description.as_deref(), color);
        print_opt_field("Locale", self.default_locale.as_deref(), color);
        if !self.locales.is_empty() {
            print_field("Locales", &self.locales.join(", "), color);
        }

        if let Some(collections) = &self.collections {
            println!();
            if collections.is_empty() {
                println!("No collections.");
            } else {
                super::TableBuilder::new()
                    .color(color)
                    .headers(Collection::headers().iter().copied())
                    .rows(collections.iter().map(|c| c.row(color)))
                    .print();
            }
        }
    }
}

impl TableRow for Collection {
    fn headers() -> &'static [&'static str] {
        &["SLUG", "NAME", "SINGLETON", "DESCRIPTION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let slug = or_dash(self.slug.as_deref());
        vec![
            if color {
                style(slug).cyan().to_string()
            } else {
                slug
            },
            or_dash(self.name.as_deref()),
            format_bool(self.is_singleton.unwrap_or(false), color),
            truncate(&or_dash(self.description.as_deref()), 40),
        ]
    }
}

impl TableOutput for Collection {
    fn print_table(&self, color: bool) {
        let title = self.name.as_deref().or(self.slug.as_deref()).unwrap_or("Collection");
        print_title(title, color);
        print_opt_field("ID", self.id.as_deref(), color);
        print_opt_field("Slug", self.slug.as_deref(), color);
        print_opt_field("Description", self.description.as_deref(), color);
        print_field(
            "Singleton",
            &format_bool(self.is_singleton.unwrap_or(false), color),
            color,
        );

        if !self.fields.is_empty() {
            println!();
            let rows = self.fields.iter().map(|field| {
                vec![
                    field.get("name").map(display_value).unwrap_or_else(|| "-".to_string()),
                    field.get("type").map(display_value).unwrap_or_else(|| "-".to_string()),
                    field
                        .get("required")
                        .and_then(Value::as_bool)
                        .map(|r| format_bool(r, color))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            });
            super::TableBuilder::new()
                .color(color)
                .headers(["FIELD", "TYPE", "REQUIRED"])
                .rows(rows)
                .print();
        }
    }
}

impl TableRow for Entry {
    fn headers() -> &'static [&'static str] {
        &["UUID", "LOCALE", "STATE", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            or_dash(self.uuid.as_deref()),
            or_dash(self.locale.as_deref()),
            format_state(&or_dash(self.state.as_deref()), color),
            or_dash(self.updated_at.as_deref().or(self.created_at.as_deref())),
        ]
    }
}

impl TableOutput for Entry {
    fn print_table(&self, color: bool) {
        print_title(self.uuid.as_deref().unwrap_or("Entry"), color);
        print_opt_field("Locale", self.locale.as_deref(), color);
        if let Some(state) = &self.state {
            print_field("State", &format_state(state, color), color);
        }
        print_opt_field("Published", self.published_at.as_deref(), color);
        print_opt_field("Created", self.created_at.as_deref(), color);
        print_opt_field("Updated", self.updated_at.as_deref(), color);

        if !self.data.is_empty() {
            println!();
            super::TableBuilder::new()
                .color(color)
                .headers(["FIELD", "VALUE"])
                .rows(
                    self.data
                        .iter()
                        .map(|(key, value)| vec![key.clone(), truncate(&display_value(value), 60)]),
                )
                .print();
        }
    }
}

impl TableRow for Asset {
    fn headers() -> &'static [&'static str] {
        &["ID", "FILENAME", "TYPE", "SIZE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            or_dash(self.id.as_deref()),
            or_dash(self.filename.as_deref()),
            or_dash(self.mime_type.as_deref()),
            self.size.map(format_size).unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableOutput for Asset {
    fn print_table(&self, color: bool) {
        print_title(self.filename.as_deref().unwrap_or("Asset"), color);
        print_opt_field("ID", self.id.as_deref(), color);
        print_opt_field("Original name", self.original_filename.as_deref(), color);
        print_opt_field("Type", self.mime_type.as_deref(), color);
        if let Some(size) = self.size {
            print_field("Size", &format_size(size), color);
        }
        print_opt_field("URL", self.url.as_deref(), color);
        print_opt_field("Created", self.created_at.as_deref(), color);
        if let Some(metadata) = self.metadata.as_ref().filter(|m| !m.is_null()) {
            print_field("Metadata", &display_value(metadata), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("Hello")), "Hello");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(null)), "-");
        assert_eq!(display_value(&json!(["a"])), r#"["a"]"#);
    }

    #[test]
    fn test_entry_row() {
        let entry: Entry = serde_json::from_value(json!({
            "uuid": "e-1",
            "locale": "en",
            "state": "draft",
            "created_at": "2026-01-10T08:00:00Z",
            "data": {"title": "Hi"}
        }))
        .unwrap();
        assert_eq!(
            entry.row(false),
            vec!["e-1", "en", "draft", "2026-01-10T08:00:00Z"]
        );
    }

    #[test]
    fn test_asset_row() {
        let asset: Asset = serde_json::from_value(json!({
            "id": 4,
            "filename": "logo.png",
            "size": 2048
        }))
        .unwrap();
        assert_eq!(asset.row(false), vec!["4", "logo.png", "-", "2.0 KiB"]);
    }

    #[test]
    fn test_collection_row() {
        let collection: Collection =
            serde_json::from_value(json!({"slug": "blog", "name": "Blog"})).unwrap();
        assert_eq!(collection.row(false), vec!["blog", "Blog", "No", "-"]);
    }
}
