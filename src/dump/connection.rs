//! MySQL client connection settings

use std::fmt;
use zeroize::Zeroizing;

use super::command::shell_quote;

/// Default MySQL port, never written to the connection string
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Connection settings for the mysql client tools
#[derive(Clone, Default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: Option<u16>,
    pub unix_socket: Option<String>,
    pub username: String,
    pub password: Zeroizing<String>,
    pub dbname: String,
    /// Magento table prefix, prepended to table patterns
    pub table_prefix: String,
}

impl ConnectionSettings {
    /// Arguments shared by `mysql` and `mysqldump`, shell-quoted
    pub fn client_tool_connection_string(&self) -> String {
        let mut parts = format!("-h{}", shell_quote(&self.host));

        if let Some(port) = self.port.filter(|port| *port != DEFAULT_MYSQL_PORT) {
            parts.push_str(&format!(" -P{}", shell_quote(&port.to_string())));
        }

        if let Some(socket) = &self.unix_socket {
            parts.push_str(&format!(" --socket={}", shell_quote(socket)));
        }

        parts.push_str(&format!(" -u{}", shell_quote(&self.username)));

        if !self.password.is_empty() {
            parts.push_str(&format!(" -p{}", shell_quote(&self.password)));
        }

        parts.push(' ');
        parts.push_str(&shell_quote(&self.dbname));
        parts
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("unix_socket", &self.unix_socket)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("table_prefix", &self.table_prefix)
            .finish()
    }
}
