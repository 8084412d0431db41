use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct BookingHeldEvent {
    pub booking_id: Uuid,
    pub agent_id: String,
    pub item_id: String,
    pub passenger_count: usize,
    pub hold_expiry: i64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct BookingPaidEvent {
    pub booking_id: Uuid,
    pub agent_id: String,
    pub total_amount: f64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct HoldLapsedEvent {
    pub booking_id: Uuid,
    pub item_id: String,
    pub hold_expiry: i64, // Unix timestamp
    pub timestamp: i64,
}
