//! Structural rdata decoding
//!
//! The wire `rdata` object carries no type tag, so the variant is picked by
//! which fields are present. Signatures are tried in this fixed order and the
//! first one whose keys are all present wins (extra keys are ignored):
//!
//! | # | Keys | Variant |
//! |---|------|---------|
//! | 1 | `ip` | A or AAAA, by the address syntax |
//! | 2 | `cname` | CNAME |
//! | 3 | `exchange`, `preference` | MX |
//! | 4 | `ptrdname` | PTR |
//! | 5 | `priority`, `weight`, `port`, `target` | SRV |
//! | 6 | `text` | TXT |
//!
//! No match is [`UnrecognizedRdataShape`](DnsSvcsError::UnrecognizedRdataShape);
//! a matched field holding the wrong kind of value is
//! [`TypeMismatch`](DnsSvcsError::TypeMismatch). Nothing is ever guessed.

use std::net::IpAddr;

use serde_json::{Map, Value};

use super::rdata::{
    AaaaRecord, ARecord, CnameRecord, MxRecord, PtrRecord, Rdata, SrvRecord, TxtRecord,
};
use crate::error::{DnsSvcsError, Result};

type Object = Map<String, Value>;
type Decoder = fn(&Object) -> Result<Rdata>;

const SIGNATURES: &[(&[&str], Decoder)] = &[
    (&["ip"], decode_address),
    (&["cname"], decode_cname),
    (&["exchange", "preference"], decode_mx),
    (&["ptrdname"], decode_ptr),
    (&["priority", "weight", "port", "target"], decode_srv),
    (&["text"], decode_txt),
];

pub(crate) fn discriminate(value: &Value) -> Result<Rdata> {
    let Some(object) = value.as_object() else {
        return Err(unrecognized(value));
    };
    SIGNATURES
        .iter()
        .find(|(keys, _)| keys.iter().all(|key| object.contains_key(*key)))
        .map_or_else(|| Err(unrecognized(value)), |(_, decode)| decode(object))
}

fn unrecognized(value: &Value) -> DnsSvcsError {
    DnsSvcsError::UnrecognizedRdataShape {
        raw: value.to_string(),
    }
}

fn string_field<'a>(object: &'a Object, field: &str) -> Result<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| DnsSvcsError::type_mismatch(field, "a string"))
}

fn u16_field(object: &Object, field: &str) -> Result<u16> {
    object
        .get(field)
        .and_then(Value::as_u64)
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| DnsSvcsError::type_mismatch(field, "an unsigned 16-bit integer"))
}

fn decode_address(object: &Object) -> Result<Rdata> {
    let ip = string_field(object, "ip")?;
    match ip.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => Ok(ARecord::from(v4).into()),
        Ok(IpAddr::V6(v6)) => Ok(AaaaRecord::from(v6).into()),
        Err(_) => Err(DnsSvcsError::type_mismatch("ip", "an IPv4 or IPv6 address")),
    }
}

fn decode_cname(object: &Object) -> Result<Rdata> {
    Ok(CnameRecord::decoded(string_field(object, "cname")?).into())
}

fn decode_mx(object: &Object) -> Result<Rdata> {
    let exchange = string_field(object, "exchange")?;
    let preference = u16_field(object, "preference")?;
    Ok(MxRecord::decoded(exchange, preference).into())
}

fn decode_ptr(object: &Object) -> Result<Rdata> {
    Ok(PtrRecord::decoded(string_field(object, "ptrdname")?).into())
}

fn decode_srv(object: &Object) -> Result<Rdata> {
    let priority = u16_field(object, "priority")?;
    let weight = u16_field(object, "weight")?;
    let port = u16_field(object, "port")?;
    let target = string_field(object, "target")?;
    Ok(SrvRecord::decoded(priority, weight, port, target).into())
}

fn decode_txt(object: &Object) -> Result<Rdata> {
    Ok(TxtRecord::decoded(string_field(object, "text")?).into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::records::rdata::RecordType;

    fn kind(value: Value) -> Option<RecordType> {
        discriminate(&value).ok().map(|r| r.record_type())
    }

    fn mismatch_field(value: Value) -> Option<String> {
        match discriminate(&value) {
            Err(DnsSvcsError::TypeMismatch { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn classifies_every_signature() {
        assert_eq!(kind(json!({"ip": "1.1.1.1"})), Some(RecordType::A));
        assert_eq!(kind(json!({"ip": "2001::8888"})), Some(RecordType::Aaaa));
        assert_eq!(kind(json!({"cname": "x.com"})), Some(RecordType::Cname));
        assert_eq!(
            kind(json!({"exchange": "mail.x.com", "preference": 10})),
            Some(RecordType::Mx)
        );
        assert_eq!(kind(json!({"ptrdname": "x.com"})), Some(RecordType::Ptr));
        assert_eq!(
            kind(json!({"priority": 1, "weight": 1, "port": 1, "target": "x.com"})),
            Some(RecordType::Srv)
        );
        assert_eq!(kind(json!({"text": "hello"})), Some(RecordType::Txt));
    }

    #[test]
    fn decoded_values_are_kept() {
        let res = discriminate(&json!({"exchange": "mail.x.com", "preference": 10}));
        assert!(
            matches!(&res, Ok(Rdata::Mx(mx)) if mx.exchange() == "mail.x.com" && mx.preference() == 10),
            "unexpected: {res:?}"
        );
        let res = discriminate(&json!({"ip": "1.1.1.1"}));
        assert!(
            matches!(&res, Ok(Rdata::A(a)) if a.ip().to_string() == "1.1.1.1"),
            "unexpected: {res:?}"
        );
    }

    #[test]
    fn unknown_and_empty_objects_are_rejected() {
        for value in [json!({"foo": "bar"}), json!({}), json!("1.1.1.1"), json!(null)] {
            let res = discriminate(&value);
            assert!(
                matches!(&res, Err(DnsSvcsError::UnrecognizedRdataShape { raw }) if *raw == value.to_string()),
                "unexpected: {res:?}"
            );
        }
    }

    #[test]
    fn partial_signatures_are_rejected() {
        // MX without preference, SRV without target
        let mx = discriminate(&json!({"exchange": "mail.x.com"}));
        let srv = discriminate(&json!({"priority": 1, "weight": 1, "port": 1}));
        assert!(matches!(mx, Err(DnsSvcsError::UnrecognizedRdataShape { .. })));
        assert!(matches!(srv, Err(DnsSvcsError::UnrecognizedRdataShape { .. })));
    }

    #[test]
    fn precedence_on_superset() {
        // ip outranks everything else present
        assert_eq!(
            kind(json!({"ip": "10.0.0.1", "text": "ignored", "cname": "ignored"})),
            Some(RecordType::A)
        );
        // cname outranks text
        assert_eq!(kind(json!({"text": "t", "cname": "c.com"})), Some(RecordType::Cname));
        // extra keys on a full signature are tolerated
        assert_eq!(
            kind(json!({"exchange": "m.x.com", "preference": 5, "ttl": 60})),
            Some(RecordType::Mx)
        );
    }

    #[test]
    fn wrong_scalar_kinds_name_the_field() {
        assert_eq!(
            mismatch_field(json!({"exchange": "mail.x.com", "preference": "10"})),
            Some("preference".to_string())
        );
        assert_eq!(
            mismatch_field(json!({"priority": 1, "weight": 1, "port": -1, "target": "x.com"})),
            Some("port".to_string())
        );
        assert_eq!(
            mismatch_field(json!({"priority": 1, "weight": 70000, "port": 1, "target": "x.com"})),
            Some("weight".to_string())
        );
        assert_eq!(
            mismatch_field(json!({"priority": 1.5, "weight": 1, "port": 1, "target": "x.com"})),
            Some("priority".to_string())
        );
        assert_eq!(mismatch_field(json!({"cname": 42})), Some("cname".to_string()));
        assert_eq!(mismatch_field(json!({"text": null})), Some("text".to_string()));
        assert_eq!(mismatch_field(json!({"ip": "not-an-ip"})), Some("ip".to_string()));
    }
}
