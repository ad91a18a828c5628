use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::GeolocationError, model::Coordinates};

/// One-shot position request.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// No position source on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

#[async_trait]
impl Locator for NoLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Reports configured home coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coords: Coordinates,
}

impl FixedLocator {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        if !(-90.0..=90.0).contains(&self.coords.latitude)
            || !(-180.0..=180.0).contains(&self.coords.longitude)
        {
            return Err(GeolocationError::Unavailable(format!(
                "invalid coordinates {}, {}",
                self.coords.latitude, self.coords.longitude
            )));
        }
        Ok(self.coords)
    }
}

/// Locator for the configured home, if any.
pub fn locator_for(home: Option<Coordinates>) -> Box<dyn Locator> {
    match home {
        Some(coords) => Box::new(FixedLocator::new(coords)),
        None => Box::new(NoLocator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_locator_is_unsupported() {
        assert_eq!(NoLocator.locate().await, Err(GeolocationError::Unsupported));
    }

    #[tokio::test]
    async fn fixed_locator_reports_home() {
        let home = Coordinates {
            latitude: 41.3,
            longitude: 19.8,
        };
        assert_eq!(locator_for(Some(home)).locate().await, Ok(home));
    }

    #[tokio::test]
    async fn fixed_locator_rejects_out_of_range() {
        let locator = FixedLocator::new(Coordinates {
            latitude: 123.0,
            longitude: 0.0,
        });
        assert!(matches!(
            locator.locate().await,
            Err(GeolocationError::Unavailable(_))
        ));
    }
}
