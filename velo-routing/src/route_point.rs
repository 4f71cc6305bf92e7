use velo_geometry::PointCh;

/// Point of a route closest to some reference point.
///
/// Candidates compare by `distance_to_reference` only; on equal distance the
/// receiver of [`RoutePoint::min`] is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    point: Option<PointCh>,
    position: f64,
    distance_to_reference: f64,
}

impl RoutePoint {
    /// No candidate yet: loses against any point at a finite distance.
    pub const NONE: RoutePoint = RoutePoint {
        point: None,
        position: f64::NAN,
        distance_to_reference: f64::INFINITY,
    };

    pub fn new(point: PointCh, position: f64, distance_to_reference: f64) -> Self {
        Self {
            point: Some(point),
            position,
            distance_to_reference,
        }
    }

    /// `None` only for [`RoutePoint::NONE`].
    pub fn point(&self) -> Option<PointCh> {
        self.point
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn distance_to_reference(&self) -> f64 {
        self.distance_to_reference
    }

    pub fn is_none(&self) -> bool {
        self.point.is_none()
    }

    pub fn with_position_shifted_by(self, delta: f64) -> Self {
        Self {
            position: self.position + delta,
            ..self
        }
    }

    pub fn min(self, that: RoutePoint) -> RoutePoint {
        if self.distance_to_reference <= that.distance_to_reference {
            self
        } else {
            that
        }
    }

    /// Like [`RoutePoint::min`], building the other candidate only if it wins.
    pub fn min_with(self, point: PointCh, position: f64, distance_to_reference: f64) -> RoutePoint {
        if self.distance_to_reference <= distance_to_reference {
            self
        } else {
            RoutePoint::new(point, position, distance_to_reference)
        }
    }
}
