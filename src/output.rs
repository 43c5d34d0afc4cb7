//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Datasource, DatasourceType, StatusMessage};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Datasource {
    fn pretty_print(&self) -> String {
        let header = format!("Datasource #{}: {}", self.id, self.name);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Type:           {}", self.ds_type),
            format!("URL:            {}", self.url),
            format!("Access:         {}", self.access),
            format!("Organization:   {}", self.org_id),
        ];

        if let Some(ref uid) = self.uid {
            lines.push(format!("UID:            {}", uid));
        }

        if let Some(ref database) = self.database {
            lines.push(format!("Database:       {}", database));
        }

        if let Some(ref user) = self.user {
            lines.push(format!("User:           {}", user));
        }

        if self.basic_auth == Some(true) {
            let user = self.basic_auth_user.as_deref().unwrap_or("-");
            lines.push(format!("Basic Auth:     {}", user));
        }

        if self.is_default {
            lines.push("Default:        yes".to_string());
        }

        if self.read_only == Some(true) {
            lines.push("Read Only:      yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for DatasourceType {
    fn pretty_print(&self) -> String {
        let mut line = format!("{} ({})", self.name, self.ds_type);
        if let Some(ref plugin_type) = self.plugin_type {
            line.push_str(&format!(" [{}]", plugin_type));
        }
        line
    }
}

impl PrettyPrint for StatusMessage {
    fn pretty_print(&self) -> String {
        let mut lines = vec![self.message.clone().unwrap_or_else(|| "(no message)".to_string())];

        if let Some(id) = self.id {
            lines.push(format!("ID:             {}", id));
        }
        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }
        if let Some(ref status) = self.status {
            lines.push(format!("Status:         {}", status));
        }

        lines.join("\n")
    }
}
