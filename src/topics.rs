/// Topic the publisher writes locations to and the subscriber reads them from.
pub const CAR_LOCATION_TOPIC: &str = "car/location";
