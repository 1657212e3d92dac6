use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// A registered customer as exposed to clients. The password hash lives only
/// on [`CustomerRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub email: String,
}

/// Stored customer row, including the bcrypt hash.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
}

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i32,
    pub party_size: i32,
    pub restaurant_id: i32,
    pub customer_id: i32,
}

/// Reservation joined with the restaurant it was made at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationWithRestaurant {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub restaurant: Restaurant,
}

/// Restaurant detail view. `reservations` is only present when the request
/// carries an identity, and then holds that customer's own bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Vec<Reservation>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub party_size: i32,
    pub restaurant_id: i32,
    pub customer_id: i32,
}

impl NewReservation {
    pub fn validate(&self) -> CoreResult<()> {
        if self.party_size <= 0 {
            return Err(CoreError::ValidationError(
                "partySize must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_never_serializes_hash() {
        let record = CustomerRecord {
            id: 7,
            email: "a@x.com".to_string(),
            password_hash: "$2b$10$secret".to_string(),
        };
        let json = serde_json::to_value(Customer::from(record)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "email": "a@x.com" }));
    }

    #[test]
    fn test_reservation_with_restaurant_shape() {
        let joined = ReservationWithRestaurant {
            reservation: Reservation { id: 1, party_size: 2, restaurant_id: 3, customer_id: 4 },
            restaurant: Restaurant { id: 3, name: "Kale".to_string() },
        };
        let json = serde_json::to_value(&joined).unwrap();
        assert_eq!(json["partySize"], 2);
        assert_eq!(json["restaurantId"], 3);
        assert_eq!(json["restaurant"]["name"], "Kale");
    }

    #[test]
    fn test_detail_omits_reservations_for_anonymous() {
        let detail = RestaurantDetail {
            restaurant: Restaurant { id: 1, name: "Leek".to_string() },
            reservations: None,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("reservations").is_none());
        assert_eq!(json["name"], "Leek");
    }

    #[test]
    fn test_party_size_must_be_positive() {
        let mut new = NewReservation { party_size: 0, restaurant_id: 1, customer_id: 1 };
        assert!(matches!(new.validate(), Err(CoreError::ValidationError(_))));

        new.party_size = 4;
        assert!(new.validate().is_ok());
    }
}
