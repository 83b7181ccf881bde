use crate::config::{Config, Endpoints};
use crate::error::GeolocatorError;
use crate::fetch::{fetch_response, ApiResponse, Fetch, HyperTransport, Transport};
use crate::identifier::Identifier;
use crate::location::Location;
use crate::precision::Precision;
use crate::timeouts::{TimeoutKind, Timeouts};

use std::time::Duration;

struct LookupEntry {
    identifier: Identifier,
    fresh: bool,
    location: Option<Location>,
}

impl LookupEntry {
    fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            fresh: false,
            location: None,
        }
    }

    fn fresh_location(&self) -> Option<&Location> {
        self.location.as_ref().filter(|_| self.fresh)
    }
}

/// A set of IPs/domains with their cached locations.
///
/// "IP" in method names means "IP or domain". Lookups are performed lazily, one HTTP request
/// per IP, and cached until the IP is removed or the precision is raised from country to city.
///
/// ```no_run
/// use ipgeolocator::{Geolocator, Precision};
///
/// let mut locator = Geolocator::with_identifiers("api-key", ["67.194.133.148", "google.com"])?;
/// locator.set_precision(Precision::Country);
/// let location = locator.get_location(Some("google.com"))?;
/// println!("{}", location.friendly_name());
/// # Ok::<(), ipgeolocator::GeolocatorError>(())
/// ```
pub struct Geolocator {
    api_key: String,
    precision: Precision,
    timeouts: Timeouts,
    endpoints: Endpoints,
    entries: Vec<LookupEntry>,
    transport: Option<Transport>,
}

impl Geolocator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(Config::new(api_key))
    }

    pub fn with_identifiers<I, S>(api_key: impl Into<String>, ips: I) -> Result<Self, GeolocatorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut geolocator = Self::new(api_key);
        for ip in ips {
            geolocator.add(ip.as_ref())?;
        }
        Ok(geolocator)
    }

    pub fn from_config(config: Config) -> Self {
        let timeouts = config.timeouts();
        let Config {
            api_key,
            precision,
            endpoints,
            ..
        } = config;
        Self {
            api_key,
            precision,
            timeouts,
            endpoints,
            entries: vec![],
            transport: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Adds an IP/domain, does nothing if it is already present.
    pub fn add(&mut self, ip: &str) -> Result<&mut Self, GeolocatorError> {
        let identifier = Identifier::new(ip)?;
        if self.position(&identifier).is_none() {
            self.entries.push(LookupEntry::new(identifier));
        }
        Ok(self)
    }

    pub fn remove(&mut self, ip: &str) -> &mut Self {
        if let Ok(identifier) = Identifier::new(ip) {
            self.entries.retain(|entry| entry.identifier != identifier);
        }
        self
    }

    pub fn contains(&self, ip: &str) -> bool {
        Identifier::new(ip)
            .map(|identifier| self.position(&identifier).is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// IPs/domains in the order they were added.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|entry| &entry.identifier)
    }

    /// Cached locations without any network access; `None` where no valid data is cached.
    pub fn entries(&self) -> impl Iterator<Item = (&Identifier, Option<&Location>)> {
        self.entries
            .iter()
            .map(|entry| (&entry.identifier, entry.fresh_location()))
    }

    pub fn is_fresh(&self, ip: &str) -> Result<bool, GeolocatorError> {
        let index = self.index_of(ip)?;
        Ok(self.entries[index].fresh)
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Raising precision from country to city drops all cached data, the other direction keeps
    /// it because city answers contain the country ones.
    pub fn set_precision(&mut self, precision: Precision) -> &mut Self {
        if self.precision == Precision::Country && precision == Precision::City {
            let mut invalidated = 0;
            for entry in self.entries.iter_mut().filter(|entry| entry.fresh) {
                entry.fresh = false;
                invalidated += 1;
            }
            if invalidated > 0 {
                log::info!("precision raised to city, {invalidated} cached location(s) invalidated");
            }
        }
        self.precision = precision;
        self
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Zero durations are rejected. Applies to the next request.
    pub fn set_timeout(
        &mut self,
        kind: TimeoutKind,
        duration: Duration,
    ) -> Result<&mut Self, GeolocatorError> {
        self.timeouts.set(kind, duration)?;
        if let Some(transport) = &mut self.transport {
            transport.set_timeouts(self.timeouts);
        }
        Ok(self)
    }

    /// Fetches data for the IP/domain even if cached data is still valid.
    pub fn lookup(&mut self, ip: &str) -> Result<&Location, GeolocatorError> {
        let index = self.index_of(ip)?;
        self.lookup_index(index)
    }

    /// Fetches data for every IP/domain without valid cached data. Stops at the first failure.
    pub fn lookup_all(&mut self) -> Result<&mut Self, GeolocatorError> {
        for index in 0..self.entries.len() {
            if !self.entries[index].fresh {
                self.lookup_index(index)?;
            }
        }
        Ok(self)
    }

    /// Location of the given IP/domain, or of the first added one when `ip` is `None`.
    pub fn get_location(&mut self, ip: Option<&str>) -> Result<&Location, GeolocatorError> {
        let index = match ip {
            Some(ip) => self.index_of(ip)?,
            None if self.entries.is_empty() => return Err(GeolocatorError::NoIdentifiers),
            None => 0,
        };
        if self.entries[index].fresh_location().is_none() {
            return self.lookup_index(index);
        }
        Ok(self.entries[index]
            .location
            .as_ref()
            .expect("fresh entry must hold a location"))
    }

    /// Looks up everything not cached and returns locations in insertion order.
    pub fn get_all_locations(&mut self) -> Result<Vec<(&Identifier, &Location)>, GeolocatorError> {
        self.lookup_all()?;
        Ok(self
            .entries
            .iter()
            .filter_map(|entry| Some((&entry.identifier, entry.fresh_location()?)))
            .collect())
    }

    fn position(&self, identifier: &Identifier) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| &entry.identifier == identifier)
    }

    fn index_of(&self, ip: &str) -> Result<usize, GeolocatorError> {
        let identifier = Identifier::new(ip)?;
        self.position(&identifier)
            .ok_or(GeolocatorError::UnknownIdentifier(identifier))
    }

    fn lookup_index(&mut self, index: usize) -> Result<&Location, GeolocatorError> {
        let identifier = self.entries[index].identifier.clone();
        let response = self.fetch(&identifier)?;
        let location = Location::from_response(identifier, response, self.precision);
        let entry = &mut self.entries[index];
        entry.fresh = true;
        let location: &Location = entry.location.insert(location);
        Ok(location)
    }

    /// Asks the primary endpoint, then the backup one. No further attempts.
    fn fetch(&mut self, identifier: &Identifier) -> Result<ApiResponse, GeolocatorError> {
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => HyperTransport::new(self.timeouts)?.into(),
        };
        let transport = self.transport.insert(transport);
        let endpoints = self.endpoints.get(self.precision);
        match fetch_response(transport, &endpoints.primary, identifier, &self.api_key) {
            Ok(response) => Ok(response),
            Err(error) => match &endpoints.backup {
                Some(backup) => {
                    log::warn!(
                        r#"lookup of "{identifier}" at {primary} failed: {error}, trying {backup}"#,
                        primary = endpoints.primary,
                    );
                    fetch_response(transport, backup, identifier, &self.api_key)
                }
                None => Err(error),
            },
        }
    }
}
