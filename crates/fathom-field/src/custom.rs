//! Vector fields backed by user-supplied functions.
//!
//! A custom field always owns a sample function. Divergence and curl come
//! from user functions when supplied and from central differencing
//! ([`FiniteDifference`]) otherwise. Which path applies is fixed at
//! construction and recorded as a [`Capabilities`] variant.
//!
//! Constructed directly (`new`, `with_divergence`, `with_derivatives`) or via
//! the builder pattern: [`CustomVectorField2::builder`],
//! [`CustomVectorField3::builder`].

use std::fmt;
use std::sync::Arc;

use glam::{DVec2, DVec3};

use crate::differencing::{FiniteDifference, DEFAULT_DERIVATIVE_RESOLUTION};
use crate::error::FieldError;
use crate::field::{
    Field, VectorField2, VectorField2Ptr, VectorField3, VectorField3Ptr, VectorSampler2,
    VectorSampler3,
};

/// Shared scalar-valued function of a 2-D position.
pub type ScalarFn2 = Arc<dyn Fn(DVec2) -> f64 + Send + Sync>;

/// Shared scalar-valued function of a 3-D position.
pub type ScalarFn3 = Arc<dyn Fn(DVec3) -> f64 + Send + Sync>;

/// Which derivatives a custom field evaluates analytically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capabilities {
    /// Divergence and curl are both differenced.
    SampleOnly,
    /// Divergence is analytic; curl is differenced.
    SampleAndDivergence,
    /// Divergence and curl are both analytic; no differencing.
    Full,
}

// ── CustomVectorField2 ──────────────────────────────────────────

#[derive(Clone)]
enum Derivatives2 {
    SampleOnly {
        differencing: FiniteDifference,
    },
    SampleAndDivergence {
        divergence: ScalarFn2,
        differencing: FiniteDifference,
    },
    Full {
        divergence: ScalarFn2,
        curl: ScalarFn2,
    },
}

/// 2-D vector field with a custom sample function.
///
/// # Examples
///
/// ```
/// use fathom_field::{CustomVectorField2, VectorField2};
/// use glam::DVec2;
///
/// let field = CustomVectorField2::new(|p: DVec2| DVec2::new(p.x, -p.y), 1e-3).unwrap();
/// assert!(field.divergence(DVec2::new(2.0, 5.0)).abs() < 1e-4);
/// ```
#[derive(Clone)]
pub struct CustomVectorField2 {
    sample: VectorSampler2,
    derivatives: Derivatives2,
}

/// Builder for [`CustomVectorField2`].
///
/// Same contract as [`CustomVectorField3Builder`].
pub struct CustomVectorField2Builder {
    sample: VectorSampler2,
    divergence: Option<ScalarFn2>,
    curl: Option<ScalarFn2>,
    resolution: f64,
}

impl CustomVectorField2 {
    /// Create a new builder around a sample function.
    pub fn builder(
        sample: impl Fn(DVec2) -> DVec2 + Send + Sync + 'static,
    ) -> CustomVectorField2Builder {
        CustomVectorField2Builder {
            sample: Arc::new(sample),
            divergence: None,
            curl: None,
            resolution: DEFAULT_DERIVATIVE_RESOLUTION,
        }
    }

    /// Field with only a sample function; divergence and curl are differenced
    /// with step `resolution`.
    ///
    /// Returns `Err(FieldError::InvalidResolution)` if `resolution` is not
    /// finite and positive.
    pub fn new(
        sample: impl Fn(DVec2) -> DVec2 + Send + Sync + 'static,
        resolution: f64,
    ) -> Result<Self, FieldError> {
        Self::builder(sample).derivative_resolution(resolution).build()
    }

    /// [`new`](Self::new) with the default step of `1e-3`.
    pub fn from_fn(sample: impl Fn(DVec2) -> DVec2 + Send + Sync + 'static) -> Self {
        Self::from_parts(
            Arc::new(sample),
            Derivatives2::SampleOnly {
                differencing: FiniteDifference::default(),
            },
        )
    }

    /// Field with analytic divergence; curl is differenced with step
    /// `resolution`.
    pub fn with_divergence(
        sample: impl Fn(DVec2) -> DVec2 + Send + Sync + 'static,
        divergence: impl Fn(DVec2) -> f64 + Send + Sync + 'static,
        resolution: f64,
    ) -> Result<Self, FieldError> {
        Self::builder(sample)
            .divergence(divergence)
            .derivative_resolution(resolution)
            .build()
    }

    /// Field with analytic divergence and curl. Never differences.
    pub fn with_derivatives(
        sample: impl Fn(DVec2) -> DVec2 + Send + Sync + 'static,
        divergence: impl Fn(DVec2) -> f64 + Send + Sync + 'static,
        curl: impl Fn(DVec2) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::from_parts(
            Arc::new(sample),
            Derivatives2::Full {
                divergence: Arc::new(divergence),
                curl: Arc::new(curl),
            },
        )
    }

    fn from_parts(sample: VectorSampler2, derivatives: Derivatives2) -> Self {
        let field = Self {
            sample,
            derivatives,
        };
        tracing::debug!(
            capabilities = ?field.capabilities(),
            resolution = ?field.derivative_resolution(),
            "custom 2-D vector field constructed"
        );
        field
    }

    /// Which derivatives are analytic.
    pub fn capabilities(&self) -> Capabilities {
        match self.derivatives {
            Derivatives2::SampleOnly { .. } => Capabilities::SampleOnly,
            Derivatives2::SampleAndDivergence { .. } => Capabilities::SampleAndDivergence,
            Derivatives2::Full { .. } => Capabilities::Full,
        }
    }

    /// Differencing step, or `None` when both derivatives are analytic.
    pub fn derivative_resolution(&self) -> Option<f64> {
        match &self.derivatives {
            Derivatives2::SampleOnly { differencing }
            | Derivatives2::SampleAndDivergence { differencing, .. } => {
                Some(differencing.resolution())
            }
            Derivatives2::Full { .. } => None,
        }
    }
}

impl CustomVectorField2Builder {
    /// Supply an analytic divergence. Curl stays differenced unless
    /// [`derivatives`](Self::derivatives) is used instead.
    pub fn divergence(mut self, divergence: impl Fn(DVec2) -> f64 + Send + Sync + 'static) -> Self {
        self.divergence = Some(Arc::new(divergence));
        self
    }

    /// Supply analytic divergence and scalar curl together.
    pub fn derivatives(
        mut self,
        divergence: impl Fn(DVec2) -> f64 + Send + Sync + 'static,
        curl: impl Fn(DVec2) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.divergence = Some(Arc::new(divergence));
        self.curl = Some(Arc::new(curl));
        self
    }

    /// Differencing step `h`. Default: `1e-3`.
    pub fn derivative_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Build the field.
    ///
    /// Returns `Err(FieldError::InvalidResolution)` if the step is not
    /// finite and positive.
    pub fn build(self) -> Result<CustomVectorField2, FieldError> {
        let differencing = FiniteDifference::new(self.resolution)?;
        let derivatives = match (self.divergence, self.curl) {
            (Some(divergence), Some(curl)) => Derivatives2::Full { divergence, curl },
            (Some(divergence), None) => Derivatives2::SampleAndDivergence {
                divergence,
                differencing,
            },
            (None, _) => Derivatives2::SampleOnly { differencing },
        };
        Ok(CustomVectorField2::from_parts(self.sample, derivatives))
    }

    /// Build the field behind a shared [`VectorField2Ptr`].
    pub fn build_shared(self) -> Result<VectorField2Ptr, FieldError> {
        Ok(Arc::new(self.build()?))
    }
}

impl fmt::Debug for CustomVectorField2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomVectorField2")
            .field("capabilities", &self.capabilities())
            .field("resolution", &self.derivative_resolution())
            .finish_non_exhaustive()
    }
}

impl Field for CustomVectorField2 {}

impl VectorField2 for CustomVectorField2 {
    fn sample(&self, x: DVec2) -> DVec2 {
        (self.sample)(x)
    }

    fn divergence(&self, x: DVec2) -> f64 {
        match &self.derivatives {
            Derivatives2::SampleOnly { differencing } => differencing.divergence2(&*self.sample, x),
            Derivatives2::SampleAndDivergence { divergence, .. }
            | Derivatives2::Full { divergence, .. } => divergence(x),
        }
    }

    fn curl(&self, x: DVec2) -> f64 {
        match &self.derivatives {
            Derivatives2::SampleOnly { differencing }
            | Derivatives2::SampleAndDivergence { differencing, .. } => {
                differencing.curl2(&*self.sample, x)
            }
            Derivatives2::Full { curl, .. } => curl(x),
        }
    }

    fn sampler(self: Arc<Self>) -> VectorSampler2 {
        Arc::clone(&self.sample)
    }
}

// ── CustomVectorField3 ──────────────────────────────────────────

#[derive(Clone)]
enum Derivatives3 {
    SampleOnly {
        differencing: FiniteDifference,
    },
    SampleAndDivergence {
        divergence: ScalarFn3,
        differencing: FiniteDifference,
    },
    Full {
        divergence: ScalarFn3,
        curl: VectorSampler3,
    },
}

/// 3-D vector field with a custom sample function.
///
/// # Examples
///
/// ```
/// use fathom_field::{CustomVectorField3, VectorField3};
/// use glam::DVec3;
///
/// // Rigid rotation about z: curl is (0, 0, 2) everywhere.
/// let field = CustomVectorField3::builder(|p: DVec3| DVec3::new(-p.y, p.x, 0.0))
///     .derivative_resolution(1e-4)
///     .build()
///     .unwrap();
/// let curl = field.curl(DVec3::new(3.0, -1.0, 0.5));
/// assert!((curl - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
/// ```
#[derive(Clone)]
pub struct CustomVectorField3 {
    sample: VectorSampler3,
    derivatives: Derivatives3,
}

/// Builder for [`CustomVectorField3`].
///
/// The sample function is required up front; analytic derivatives and the
/// differencing step are optional. The step defaults to `1e-3` and is
/// validated even when both derivatives are analytic.
pub struct CustomVectorField3Builder {
    sample: VectorSampler3,
    divergence: Option<ScalarFn3>,
    curl: Option<VectorSampler3>,
    resolution: f64,
}

impl CustomVectorField3 {
    /// Create a new builder around a sample function.
    pub fn builder(
        sample: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static,
    ) -> CustomVectorField3Builder {
        CustomVectorField3Builder {
            sample: Arc::new(sample),
            divergence: None,
            curl: None,
            resolution: DEFAULT_DERIVATIVE_RESOLUTION,
        }
    }

    /// Field with only a sample function; divergence and curl are differenced
    /// with step `resolution`.
    ///
    /// Returns `Err(FieldError::InvalidResolution)` if `resolution` is not
    /// finite and positive.
    pub fn new(
        sample: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static,
        resolution: f64,
    ) -> Result<Self, FieldError> {
        Self::builder(sample).derivative_resolution(resolution).build()
    }

    /// [`new`](Self::new) with the default step of `1e-3`.
    pub fn from_fn(sample: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static) -> Self {
        Self::from_parts(
            Arc::new(sample),
            Derivatives3::SampleOnly {
                differencing: FiniteDifference::default(),
            },
        )
    }

    /// Field with analytic divergence; curl is differenced with step
    /// `resolution`.
    pub fn with_divergence(
        sample: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static,
        divergence: impl Fn(DVec3) -> f64 + Send + Sync + 'static,
        resolution: f64,
    ) -> Result<Self, FieldError> {
        Self::builder(sample)
            .divergence(divergence)
            .derivative_resolution(resolution)
            .build()
    }

    /// Field with analytic divergence and curl. Never differences.
    pub fn with_derivatives(
        sample: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static,
        divergence: impl Fn(DVec3) -> f64 + Send + Sync + 'static,
        curl: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static,
    ) -> Self {
        Self::from_parts(
            Arc::new(sample),
            Derivatives3::Full {
                divergence: Arc::new(divergence),
                curl: Arc::new(curl),
            },
        )
    }

    fn from_parts(sample: VectorSampler3, derivatives: Derivatives3) -> Self {
        let field = Self {
            sample,
            derivatives,
        };
        tracing::debug!(
            capabilities = ?field.capabilities(),
            resolution = ?field.derivative_resolution(),
            "custom 3-D vector field constructed"
        );
        field
    }

    /// Which derivatives are analytic.
    pub fn capabilities(&self) -> Capabilities {
        match self.derivatives {
            Derivatives3::SampleOnly { .. } => Capabilities::SampleOnly,
            Derivatives3::SampleAndDivergence { .. } => Capabilities::SampleAndDivergence,
            Derivatives3::Full { .. } => Capabilities::Full,
        }
    }

    /// Differencing step, or `None` when both derivatives are analytic.
    pub fn derivative_resolution(&self) -> Option<f64> {
        match &self.derivatives {
            Derivatives3::SampleOnly { differencing }
            | Derivatives3::SampleAndDivergence { differencing, .. } => {
                Some(differencing.resolution())
            }
            Derivatives3::Full { .. } => None,
        }
    }
}

impl CustomVectorField3Builder {
    /// Supply an analytic divergence. Curl stays differenced unless
    /// [`derivatives`](Self::derivatives) is used instead.
    pub fn divergence(mut self, divergence: impl Fn(DVec3) -> f64 + Send + Sync + 'static) -> Self {
        self.divergence = Some(Arc::new(divergence));
        self
    }

    /// Supply analytic divergence and curl together.
    pub fn derivatives(
        mut self,
        divergence: impl Fn(DVec3) -> f64 + Send + Sync + 'static,
        curl: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static,
    ) -> Self {
        self.divergence = Some(Arc::new(divergence));
        self.curl = Some(Arc::new(curl));
        self
    }

    /// Differencing step `h`. Default: `1e-3`.
    pub fn derivative_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Build the field.
    ///
    /// Returns `Err(FieldError::InvalidResolution)` if the step is not
    /// finite and positive.
    pub fn build(self) -> Result<CustomVectorField3, FieldError> {
        let differencing = FiniteDifference::new(self.resolution)?;
        let derivatives = match (self.divergence, self.curl) {
            (Some(divergence), Some(curl)) => Derivatives3::Full { divergence, curl },
            (Some(divergence), None) => Derivatives3::SampleAndDivergence {
                divergence,
                differencing,
            },
            // `curl` is only ever set together with `divergence`.
            (None, _) => Derivatives3::SampleOnly { differencing },
        };
        Ok(CustomVectorField3::from_parts(self.sample, derivatives))
    }

    /// Build the field behind a shared [`VectorField3Ptr`].
    pub fn build_shared(self) -> Result<VectorField3Ptr, FieldError> {
        Ok(Arc::new(self.build()?))
    }
}

impl fmt::Debug for CustomVectorField3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomVectorField3")
            .field("capabilities", &self.capabilities())
            .field("resolution", &self.derivative_resolution())
            .finish_non_exhaustive()
    }
}

impl Field for CustomVectorField3 {}

impl VectorField3 for CustomVectorField3 {
    fn sample(&self, x: DVec3) -> DVec3 {
        (self.sample)(x)
    }

    fn divergence(&self, x: DVec3) -> f64 {
        match &self.derivatives {
            Derivatives3::SampleOnly { differencing } => differencing.divergence3(&*self.sample, x),
            Derivatives3::SampleAndDivergence { divergence, .. }
            | Derivatives3::Full { divergence, .. } => divergence(x),
        }
    }

    fn curl(&self, x: DVec3) -> DVec3 {
        match &self.derivatives {
            Derivatives3::SampleOnly { differencing }
            | Derivatives3::SampleAndDivergence { differencing, .. } => {
                differencing.curl3(&*self.sample, x)
            }
            Derivatives3::Full { curl, .. } => curl(x),
        }
    }

    fn sampler(self: Arc<Self>) -> VectorSampler3 {
        Arc::clone(&self.sample)
    }
}
