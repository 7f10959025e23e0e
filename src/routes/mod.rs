// Routes module - route records and the routes file parser/formatter

pub mod formatter;
pub mod netmask;
pub mod parser;

use serde::{Deserialize, Serialize};

use netmask::{AddressFamily, NetmaskError};

/// Literal network value marking a default route.
pub const DEFAULT_ROUTE: &str = "default";

/// Free-form trailing attributes of a route line, e.g. `table 200`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum RouteOptions {
    #[default]
    Absent,
    Present(String),
}

impl RouteOptions {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            RouteOptions::Absent => None,
            RouteOptions::Present(text) => Some(text),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RouteOptions::Absent)
    }
}

impl From<Option<String>> for RouteOptions {
    fn from(value: Option<String>) -> Self {
        value.map_or(RouteOptions::Absent, RouteOptions::Present)
    }
}

impl From<RouteOptions> for Option<String> {
    fn from(value: RouteOptions) -> Self {
        match value {
            RouteOptions::Absent => None,
            RouteOptions::Present(text) => Some(text),
        }
    }
}

/// The six accessors the formatter needs from a route-like entity.
///
/// Mandatory fields are optional here so that callers holding incomplete
/// routes get a `MissingField` error instead of a bogus line.
pub trait RouteFields {
    fn name(&self) -> &str;
    fn network(&self) -> &str;
    fn netmask(&self) -> Option<&str>;
    fn gateway(&self) -> Option<&str>;
    fn interface(&self) -> Option<&str>;
    fn options(&self) -> &RouteOptions;
}

/// One fully-specified line of a routes file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    name: String,
    network: String,
    netmask: String,
    gateway: String,
    interface: String,
    #[serde(skip_serializing_if = "RouteOptions::is_absent")]
    options: RouteOptions,
}

impl RouteRecord {
    /// Build a record, deriving its name from the network and netmask.
    ///
    /// Default routes are named `default` and get the zero-length netmask
    /// of the gateway's family, whatever mask was supplied.
    pub fn new(
        network: impl Into<String>,
        netmask: impl Into<String>,
        gateway: impl Into<String>,
        interface: impl Into<String>,
        options: RouteOptions,
    ) -> Result<Self, NetmaskError> {
        let network = network.into();
        let gateway = gateway.into();

        let (name, netmask) = if network == DEFAULT_ROUTE {
            let mask = netmask::default_netmask(AddressFamily::of(&gateway));
            (DEFAULT_ROUTE.to_string(), mask.to_string())
        } else {
            let netmask = netmask.into();
            let prefix = netmask::prefix_len(&netmask)?;
            (format!("{}/{}", network, prefix), netmask)
        };

        Ok(RouteRecord {
            name,
            network,
            netmask,
            gateway,
            interface: interface.into(),
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn netmask(&self) -> &str {
        &self.netmask
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    pub fn is_default(&self) -> bool {
        self.network == DEFAULT_ROUTE
    }

    /// Address family, taken from the gateway for default routes.
    pub fn family(&self) -> AddressFamily {
        if self.is_default() {
            AddressFamily::of(&self.gateway)
        } else {
            AddressFamily::of(&self.network)
        }
    }

    pub fn prefix_len(&self) -> u8 {
        if self.is_default() {
            return 0;
        }
        // The constructor already validated the mask
        netmask::prefix_len(&self.netmask).unwrap_or(0)
    }
}

impl RouteFields for RouteRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn network(&self) -> &str {
        &self.network
    }

    fn netmask(&self) -> Option<&str> {
        Some(&self.netmask)
    }

    fn gateway(&self) -> Option<&str> {
        Some(&self.gateway)
    }

    fn interface(&self) -> Option<&str> {
        Some(&self.interface)
    }

    fn options(&self) -> &RouteOptions {
        &self.options
    }
}

/// A route as supplied by an outside caller, possibly with fields unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDraft {
    #[serde(default)]
    pub name: Option<String>,
    pub network: String,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub options: RouteOptions,
}

impl RouteFields for RouteDraft {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.network)
    }

    fn network(&self) -> &str {
        &self.network
    }

    fn netmask(&self) -> Option<&str> {
        self.netmask.as_deref()
    }

    fn gateway(&self) -> Option<&str> {
        self.gateway.as_deref()
    }

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    fn options(&self) -> &RouteOptions {
        &self.options
    }
}

impl From<RouteRecord> for RouteDraft {
    fn from(record: RouteRecord) -> Self {
        RouteDraft {
            name: Some(record.name),
            network: record.network,
            netmask: Some(record.netmask),
            gateway: Some(record.gateway),
            interface: Some(record.interface),
            options: record.options,
        }
    }
}
