//! Resource record payloads
//!
//! One payload struct per record type, the [`Rdata`] union over them, and
//! the two wire families built from it: [`RdataInput`] (create) and
//! [`RdataUpdateInput`] (update). The two families are only obtainable through
//! validating constructors, [`RdataBuilder`], or a decode that re-runs those
//! checks, so a create or update payload in hand is always complete. A bare
//! [`Rdata`] decoded from a server response keeps whatever the server sent.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::discriminator;
use crate::error::{DnsSvcsError, Result};

/// Record types supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ptr,
    Srv,
    Txt,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DnsSvcsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "PTR" => Ok(Self::Ptr),
            "SRV" => Ok(Self::Srv),
            "TXT" => Ok(Self::Txt),
            _ => Err(DnsSvcsError::validation(
                "type",
                format!("unsupported record type '{s}'"),
            )),
        }
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(DnsSvcsError::missing(field));
    }
    Ok(value.to_string())
}

// ============ Payloads ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ARecord {
    ip: Ipv4Addr,
}

impl ARecord {
    pub fn new(ip: &str) -> Result<Self> {
        let ip = required_text("ip", ip)?;
        ip.trim()
            .parse()
            .map(|ip| Self { ip })
            .map_err(|_| DnsSvcsError::validation("ip", format!("'{ip}' is not an IPv4 address")))
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }
}

impl From<Ipv4Addr> for ARecord {
    fn from(ip: Ipv4Addr) -> Self {
        Self { ip }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AaaaRecord {
    ip: Ipv6Addr,
}

impl AaaaRecord {
    pub fn new(ip: &str) -> Result<Self> {
        let ip = required_text("ip", ip)?;
        ip.trim()
            .parse()
            .map(|ip| Self { ip })
            .map_err(|_| DnsSvcsError::validation("ip", format!("'{ip}' is not an IPv6 address")))
    }

    pub fn ip(&self) -> Ipv6Addr {
        self.ip
    }
}

impl From<Ipv6Addr> for AaaaRecord {
    fn from(ip: Ipv6Addr) -> Self {
        Self { ip }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CnameRecord {
    cname: String,
}

impl CnameRecord {
    pub fn new(cname: &str) -> Result<Self> {
        Ok(Self {
            cname: required_text("cname", cname)?,
        })
    }

    pub fn cname(&self) -> &str {
        &self.cname
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MxRecord {
    exchange: String,
    preference: u16,
}

impl MxRecord {
    pub fn new(exchange: &str, preference: u16) -> Result<Self> {
        Ok(Self {
            exchange: required_text("exchange", exchange)?,
            preference,
        })
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PtrRecord {
    ptrdname: String,
}

impl PtrRecord {
    pub fn new(ptrdname: &str) -> Result<Self> {
        Ok(Self {
            ptrdname: required_text("ptrdname", ptrdname)?,
        })
    }

    pub fn ptrdname(&self) -> &str {
        &self.ptrdname
    }
}

/// Wire field order is priority, weight, port, target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SrvRecord {
    priority: u16,
    weight: u16,
    port: u16,
    target: String,
}

impl SrvRecord {
    pub fn new(priority: u16, weight: u16, port: u16, target: &str) -> Result<Self> {
        Ok(Self {
            priority,
            weight,
            port,
            target: required_text("target", target)?,
        })
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// TXT payload; the wire field is `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TxtRecord {
    text: String,
}

impl TxtRecord {
    pub fn new(text: &str) -> Result<Self> {
        Ok(Self {
            text: required_text("text", text)?,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

// Decoder-side constructors: shape and scalar kinds are already checked.
impl CnameRecord {
    pub(super) fn decoded(cname: &str) -> Self {
        Self {
            cname: cname.to_string(),
        }
    }
}

impl MxRecord {
    pub(super) fn decoded(exchange: &str, preference: u16) -> Self {
        Self {
            exchange: exchange.to_string(),
            preference,
        }
    }
}

impl PtrRecord {
    pub(super) fn decoded(ptrdname: &str) -> Self {
        Self {
            ptrdname: ptrdname.to_string(),
        }
    }
}

impl SrvRecord {
    pub(super) fn decoded(priority: u16, weight: u16, port: u16, target: &str) -> Self {
        Self {
            priority,
            weight,
            port,
            target: target.to_string(),
        }
    }
}

impl TxtRecord {
    pub(super) fn decoded(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

// ============ Rdata ============

/// Type-specific payload of a resource record. Serializes to the bare
/// payload object (`{"ip": "1.1.1.1"}`); there is no tag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Rdata {
    A(ARecord),
    Aaaa(AaaaRecord),
    Cname(CnameRecord),
    Mx(MxRecord),
    Ptr(PtrRecord),
    Srv(SrvRecord),
    Txt(TxtRecord),
}

impl Rdata {
    /// The record type this payload belongs to.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::Aaaa(_) => RecordType::Aaaa,
            Self::Cname(_) => RecordType::Cname,
            Self::Mx(_) => RecordType::Mx,
            Self::Ptr(_) => RecordType::Ptr,
            Self::Srv(_) => RecordType::Srv,
            Self::Txt(_) => RecordType::Txt,
        }
    }

    /// Decode a generic JSON `rdata` object by its field set.
    ///
    /// See [`discriminator`](super::discriminator) for the precedence order.
    pub fn from_value(value: &Value) -> Result<Self> {
        discriminator::discriminate(value)
    }

    /// Human-readable rendering, e.g. `10 mail.example.com` for MX.
    pub fn display_value(&self) -> String {
        match self {
            Self::A(r) => r.ip.to_string(),
            Self::Aaaa(r) => r.ip.to_string(),
            Self::Cname(r) => r.cname.clone(),
            Self::Mx(r) => format!("{} {}", r.preference, r.exchange),
            Self::Ptr(r) => r.ptrdname.clone(),
            Self::Srv(r) => format!("{} {} {} {}", r.priority, r.weight, r.port, r.target),
            Self::Txt(r) => r.text.clone(),
        }
    }

    /// Re-run the constructor checks on a structurally decoded payload.
    fn validated(self) -> Result<Self> {
        Ok(match self {
            Self::A(_) | Self::Aaaa(_) => self,
            Self::Cname(r) => CnameRecord::new(&r.cname)?.into(),
            Self::Mx(r) => MxRecord::new(&r.exchange, r.preference)?.into(),
            Self::Ptr(r) => PtrRecord::new(&r.ptrdname)?.into(),
            Self::Srv(r) => SrvRecord::new(r.priority, r.weight, r.port, &r.target)?.into(),
            Self::Txt(r) => TxtRecord::new(&r.text)?.into(),
        })
    }
}

impl<'de> Deserialize<'de> for Rdata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl From<ARecord> for Rdata {
    fn from(r: ARecord) -> Self {
        Self::A(r)
    }
}

impl From<AaaaRecord> for Rdata {
    fn from(r: AaaaRecord) -> Self {
        Self::Aaaa(r)
    }
}

impl From<CnameRecord> for Rdata {
    fn from(r: CnameRecord) -> Self {
        Self::Cname(r)
    }
}

impl From<MxRecord> for Rdata {
    fn from(r: MxRecord) -> Self {
        Self::Mx(r)
    }
}

impl From<PtrRecord> for Rdata {
    fn from(r: PtrRecord) -> Self {
        Self::Ptr(r)
    }
}

impl From<SrvRecord> for Rdata {
    fn from(r: SrvRecord) -> Self {
        Self::Srv(r)
    }
}

impl From<TxtRecord> for Rdata {
    fn from(r: TxtRecord) -> Self {
        Self::Txt(r)
    }
}

// ============ Create / Update families ============

/// Defines an rdata family: a distinct newtype over [`Rdata`] with one
/// validating constructor per record type.
macro_rules! rdata_family {
    (@payloads $name:ident: $($payload:ident),+) => {
        $(
            impl From<$payload> for $name {
                fn from(payload: $payload) -> Self {
                    Self(payload.into())
                }
            }
        )+
    };
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(Rdata);

        impl $name {
            pub fn a(ip: &str) -> Result<Self> {
                ARecord::new(ip).map(Into::into)
            }

            pub fn aaaa(ip: &str) -> Result<Self> {
                AaaaRecord::new(ip).map(Into::into)
            }

            pub fn cname(cname: &str) -> Result<Self> {
                CnameRecord::new(cname).map(Into::into)
            }

            pub fn mx(exchange: &str, preference: u16) -> Result<Self> {
                MxRecord::new(exchange, preference).map(Into::into)
            }

            pub fn ptr(ptrdname: &str) -> Result<Self> {
                PtrRecord::new(ptrdname).map(Into::into)
            }

            pub fn srv(priority: u16, weight: u16, port: u16, target: &str) -> Result<Self> {
                SrvRecord::new(priority, weight, port, target).map(Into::into)
            }

            pub fn txt(text: &str) -> Result<Self> {
                TxtRecord::new(text).map(Into::into)
            }

            /// Structural decode, same precedence as [`Rdata::from_value`],
            /// followed by the constructor checks.
            pub fn from_value(value: &Value) -> Result<Self> {
                Rdata::from_value(value)?.validated().map(Self)
            }

            pub fn record_type(&self) -> RecordType {
                self.0.record_type()
            }

            pub fn rdata(&self) -> &Rdata {
                &self.0
            }

            pub fn into_rdata(self) -> Rdata {
                self.0
            }
        }

        impl TryFrom<Rdata> for $name {
            type Error = DnsSvcsError;

            fn try_from(rdata: Rdata) -> Result<Self> {
                rdata.validated().map(Self)
            }
        }

        rdata_family!(
            @payloads $name: ARecord, AaaaRecord, CnameRecord, MxRecord, PtrRecord, SrvRecord,
            TxtRecord
        );

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = Value::deserialize(deserializer)?;
                Self::from_value(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

rdata_family!(
    /// Rdata attached to a create request.
    RdataInput
);

rdata_family!(
    /// Rdata attached to an update request.
    RdataUpdateInput
);

// ============ Builder ============

/// Field-by-field rdata assembly for values that arrive untyped (forms,
/// config files). Numbers are taken as `i64` and range-checked in
/// [`build`](Self::build), which also reports the first missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdataBuilder {
    record_type: RecordType,
    ip: Option<String>,
    cname: Option<String>,
    exchange: Option<String>,
    preference: Option<i64>,
    ptrdname: Option<String>,
    priority: Option<i64>,
    weight: Option<i64>,
    port: Option<i64>,
    target: Option<String>,
    text: Option<String>,
}

impl RdataBuilder {
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            ip: None,
            cname: None,
            exchange: None,
            preference: None,
            ptrdname: None,
            priority: None,
            weight: None,
            port: None,
            target: None,
            text: None,
        }
    }

    #[must_use]
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn cname(mut self, cname: impl Into<String>) -> Self {
        self.cname = Some(cname.into());
        self
    }

    #[must_use]
    pub fn exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    #[must_use]
    pub fn preference(mut self, preference: i64) -> Self {
        self.preference = Some(preference);
        self
    }

    #[must_use]
    pub fn ptrdname(mut self, ptrdname: impl Into<String>) -> Self {
        self.ptrdname = Some(ptrdname.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn port(mut self, port: i64) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn build(&self) -> Result<Rdata> {
        Ok(match self.record_type {
            RecordType::A => ARecord::new(text_field("ip", self.ip.as_deref())?)?.into(),
            RecordType::Aaaa => AaaaRecord::new(text_field("ip", self.ip.as_deref())?)?.into(),
            RecordType::Cname => {
                CnameRecord::new(text_field("cname", self.cname.as_deref())?)?.into()
            }
            RecordType::Mx => MxRecord::new(
                text_field("exchange", self.exchange.as_deref())?,
                u16_field("preference", self.preference)?,
            )?
            .into(),
            RecordType::Ptr => {
                PtrRecord::new(text_field("ptrdname", self.ptrdname.as_deref())?)?.into()
            }
            RecordType::Srv => SrvRecord::new(
                u16_field("priority", self.priority)?,
                u16_field("weight", self.weight)?,
                u16_field("port", self.port)?,
                text_field("target", self.target.as_deref())?,
            )?
            .into(),
            RecordType::Txt => TxtRecord::new(text_field("text", self.text.as_deref())?)?.into(),
        })
    }

    pub fn build_input(&self) -> Result<RdataInput> {
        self.build().map(RdataInput)
    }

    pub fn build_update(&self) -> Result<RdataUpdateInput> {
        self.build().map(RdataUpdateInput)
    }
}

fn text_field<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| DnsSvcsError::missing(field))
}

fn u16_field(field: &str, value: Option<i64>) -> Result<u16> {
    let value = value.ok_or_else(|| DnsSvcsError::missing(field))?;
    u16::try_from(value)
        .map_err(|_| DnsSvcsError::validation(field, format!("{value} is outside 0..=65535")))
}
