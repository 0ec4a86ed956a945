use serde::ser::{Serialize, SerializeMap, Serializer};

/// Vehicle attributes the checker renders as `<th id="...">` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAttribute {
    RegistrationNumber,
    TypeApproval,
    Type,
    Make,
    Model,
    Colour,
    FuelType,
}

impl VehicleAttribute {
    pub const ALL: [VehicleAttribute; 7] = [
        VehicleAttribute::RegistrationNumber,
        VehicleAttribute::TypeApproval,
        VehicleAttribute::Type,
        VehicleAttribute::Make,
        VehicleAttribute::Model,
        VehicleAttribute::Colour,
        VehicleAttribute::FuelType,
    ];

    /// Element id on the checker page, also the key in the response body
    pub fn id(&self) -> &'static str {
        match self {
            VehicleAttribute::RegistrationNumber => "registration-number",
            VehicleAttribute::TypeApproval => "type-approval",
            VehicleAttribute::Type => "type",
            VehicleAttribute::Make => "make",
            VehicleAttribute::Model => "model",
            VehicleAttribute::Colour => "colour",
            VehicleAttribute::FuelType => "fuel-type",
        }
    }
}

/// Attributes found on the lookup page, in `VehicleAttribute::ALL` order.
/// Attributes missing from the page are simply not present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleRecord {
    attributes: Vec<(VehicleAttribute, String)>,
}

impl VehicleRecord {
    pub fn insert(&mut self, attribute: VehicleAttribute, value: String) {
        match self.attributes.iter_mut().find(|(a, _)| *a == attribute) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((attribute, value)),
        }
    }

    pub fn get(&self, attribute: VehicleAttribute) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Serialize for VehicleRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (attribute, value) in &self.attributes {
            map.serialize_entry(attribute.id(), value)?;
        }
        map.end()
    }
}

/// Would the vehicle be charged to enter the zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeDetermination {
    Charged,
    NotCharged,
    /// Not found, or the result table was ambiguous or silent
    Unknown,
}

impl ChargeDetermination {
    /// Decide from the two table signals. Conflicting or absent signals are
    /// `Unknown`.
    pub fn from_signals(charged: bool, not_charged: bool) -> Self {
        match (charged, not_charged) {
            (true, false) => ChargeDetermination::Charged,
            (false, true) => ChargeDetermination::NotCharged,
            _ => ChargeDetermination::Unknown,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ChargeDetermination::Charged => Some(true),
            ChargeDetermination::NotCharged => Some(false),
            ChargeDetermination::Unknown => None,
        }
    }
}

/// Serialized as `true`, `false` or `null`
impl Serialize for ChargeDetermination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_table() {
        assert_eq!(
            ChargeDetermination::from_signals(true, true),
            ChargeDetermination::Unknown
        );
        assert_eq!(
            ChargeDetermination::from_signals(true, false),
            ChargeDetermination::Charged
        );
        assert_eq!(
            ChargeDetermination::from_signals(false, true),
            ChargeDetermination::NotCharged
        );
        assert_eq!(
            ChargeDetermination::from_signals(false, false),
            ChargeDetermination::Unknown
        );
    }

    #[test]
    fn test_charge_serializes_as_nullable_bool() {
        assert_eq!(
            serde_json::to_string(&ChargeDetermination::Charged).unwrap(),
            "true"
        );
        assert_eq!(
            serde_json::to_string(&ChargeDetermination::Unknown).unwrap(),
            "null"
        );
    }

    #[test]
    fn test_record_keeps_insertion_order_and_page_ids() {
        let mut record = VehicleRecord::default();
        record.insert(VehicleAttribute::Make, "FORD".to_string());
        record.insert(VehicleAttribute::FuelType, "Petrol".to_string());
        record.insert(VehicleAttribute::Make, "VAUXHALL".to_string());

        assert_eq!(record.len(), 2);
        assert_eq!(record.get(VehicleAttribute::Make), Some("VAUXHALL"));
        assert_eq!(record.get(VehicleAttribute::Colour), None);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"make":"VAUXHALL","fuel-type":"Petrol"}"#
        );
    }
}
