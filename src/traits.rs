//! Seams between the page controller and the outside world.
//!
//! The controller only talks to the network and to the user through these
//! traits, so tests can swap in scripted implementations.

use crate::error::TripError;
use crate::model::{TripForm, TripResponse};

/// Creates a trip plan from the submitted form.
pub trait TripApi {
    fn create_trip(&self, form: &TripForm) -> Result<TripResponse, TripError>;
}

impl<T: TripApi + ?Sized> TripApi for &T {
    fn create_trip(&self, form: &TripForm) -> Result<TripResponse, TripError> {
        (**self).create_trip(form)
    }
}

/// Surfaces a blocking, user-facing message.
pub trait Notifier {
    fn alert(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}
