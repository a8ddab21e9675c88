//! Shipment lifecycle orchestration.
//!
//! Every operation validates through the pure engine where relevant, then
//! delegates its writes to a single atomic store call. Operations return
//! stillwater effects; run them against an environment implementing
//! [`ShipmentStore`]:
//!
//! ```text
//! let lifecycle = ShipmentLifecycle::new();
//! let shipment = lifecycle
//!     .update_status(id, "PICKED_UP", Actor::driver(5), None)
//!     .run(&store)
//!     .await?;
//! ```
//!
//! Failure semantics: engine rejections and store faults surface verbatim
//! through [`LifecycleError`]; a failed operation writes nothing.

use crate::core::{engine, Actor, ShipmentStatus, TimelineEntry};
use crate::model::{DriverId, NewParcel, NewShipment, Parcel, ParcelUpdate, Shipment, ShipmentUpdate};
use crate::service::codes;
use crate::service::error::LifecycleError;
use crate::service::validate::{self, Violation};
use crate::store::{EntryDraft, ShipmentStore, StoreError};
use chrono::Utc;
use stillwater::prelude::*;
use stillwater::validation::Validation;
use tracing::{debug, info};
use uuid::Uuid;

/// Stateful orchestration around the transition engine; the single
/// authority for mutating shipment status and history.
///
/// Holds no data beyond configuration; cheap to construct and safe to
/// share.
#[derive(Clone, Copy, Debug)]
pub struct ShipmentLifecycle {
    max_code_attempts: usize,
}

impl Default for ShipmentLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipmentLifecycle {
    pub fn new() -> Self {
        Self {
            max_code_attempts: codes::MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Create a shipment in status `CREATED` with a freshly generated
    /// unique tracking code and one initial timeline entry.
    pub fn create_shipment<Env>(
        &self,
        input: NewShipment,
        actor: Actor,
    ) -> impl Effect<Output = Shipment, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        let max_attempts = self.max_code_attempts;
        from_fn(move |env: &Env| -> Result<Shipment, LifecycleError> {
            check(validate::validate_new_shipment(&input))?;
            if let Some(driver_id) = input.assigned_driver {
                ensure_driver_exists(env, driver_id)?;
            }

            let tracking_code = generate_unique(
                env,
                max_attempts,
                "tracking code",
                codes::tracking_code_candidate,
                |env, code| env.tracking_code_exists(code),
            )?;

            let now = Utc::now();
            let shipment = Shipment {
                id: Uuid::new_v4(),
                tracking_code,
                sender: input.sender.clone(),
                receiver: input.receiver.clone(),
                status: ShipmentStatus::Created,
                assigned_driver: input.assigned_driver,
                estimated_delivery: input.estimated_delivery,
                created_at: now,
                updated_at: now,
            };

            env.insert_shipment(&shipment, EntryDraft::noted(actor, "Shipment created"))?;
            info!(
                shipment = %shipment.id,
                tracking_code = %shipment.tracking_code,
                "shipment created"
            );
            Ok(shipment)
        })
    }

    /// Apply detail edits (sender/receiver/estimated delivery). Never
    /// touches status, assignment, or the timeline.
    pub fn update_details<Env>(
        &self,
        shipment_id: Uuid,
        update: ShipmentUpdate,
    ) -> impl Effect<Output = Shipment, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Shipment, LifecycleError> {
            check(validate::validate_shipment_update(&update))?;
            Ok(env.update_details(shipment_id, update.clone())?)
        })
    }

    /// Assign or unassign a driver. The status does not change, but an
    /// assignment entry is appended to the timeline carrying the current
    /// status - that is how assignment events surface for auditing.
    pub fn assign_driver<Env>(
        &self,
        shipment_id: Uuid,
        driver_id: Option<DriverId>,
        actor: Actor,
    ) -> impl Effect<Output = Shipment, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Shipment, LifecycleError> {
            let note = match driver_id {
                Some(id) => {
                    ensure_driver_exists(env, id)?;
                    format!("Driver assigned (ID: {id})")
                }
                None => "Driver unassigned".to_string(),
            };
            let shipment =
                env.set_assigned_driver(shipment_id, driver_id, EntryDraft::noted(actor, note))?;
            debug!(shipment = %shipment_id, driver = ?driver_id, "driver assignment changed");
            Ok(shipment)
        })
    }

    /// Move a shipment to a new status.
    ///
    /// The proposed status arrives as the raw string the caller submitted;
    /// the engine validates it against the status read inside this
    /// operation, and the store's compare-and-set rejects the write if a
    /// concurrent transition got there first.
    pub fn update_status<Env>(
        &self,
        shipment_id: Uuid,
        proposed: impl Into<String>,
        actor: Actor,
        notes: Option<String>,
    ) -> impl Effect<Output = Shipment, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        let proposed = proposed.into();
        from_fn(move |env: &Env| -> Result<Shipment, LifecycleError> {
            let shipment = env.shipment(shipment_id)?;
            let target = engine::validate_transition(shipment.status, &proposed, actor.role)?;
            let updated = env.commit_transition(
                shipment_id,
                shipment.status,
                target,
                EntryDraft::new(actor, notes.clone()),
            )?;
            info!(
                shipment = %shipment_id,
                from = %shipment.status,
                to = %target,
                role = %actor.role,
                "shipment status updated"
            );
            Ok(updated)
        })
    }

    /// The shipment's timeline, newest entry first. Read-only and
    /// idempotent.
    pub fn timeline<Env>(
        &self,
        shipment_id: Uuid,
    ) -> impl Effect<Output = Vec<TimelineEntry>, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Vec<TimelineEntry>, LifecycleError> {
            Ok(env.timeline(shipment_id)?.newest_first())
        })
    }

    pub fn shipment<Env>(
        &self,
        shipment_id: Uuid,
    ) -> impl Effect<Output = Shipment, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Shipment, LifecycleError> {
            Ok(env.shipment(shipment_id)?)
        })
    }

    pub fn find_by_tracking_code<Env>(
        &self,
        code: impl Into<String>,
    ) -> impl Effect<Output = Option<Shipment>, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        let code = code.into();
        from_fn(move |env: &Env| -> Result<Option<Shipment>, LifecycleError> {
            Ok(env.find_by_tracking_code(&code)?)
        })
    }

    pub fn all_shipments<Env>(
        &self,
    ) -> impl Effect<Output = Vec<Shipment>, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Vec<Shipment>, LifecycleError> {
            Ok(env.all_shipments()?)
        })
    }

    /// Shipments assigned to one driver; no engine involvement.
    pub fn shipments_for_driver<Env>(
        &self,
        driver_id: DriverId,
    ) -> impl Effect<Output = Vec<Shipment>, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Vec<Shipment>, LifecycleError> {
            Ok(env.shipments_for_driver(driver_id)?)
        })
    }

    /// Delete a shipment, cascading to parcels and timeline. Admin surface.
    pub fn delete_shipment<Env>(
        &self,
        shipment_id: Uuid,
    ) -> impl Effect<Output = (), Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<(), LifecycleError> {
            env.delete_shipment(shipment_id)?;
            info!(shipment = %shipment_id, "shipment deleted");
            Ok(())
        })
    }

    /// Add a parcel to a shipment, generating a unique barcode when the
    /// input does not carry one.
    pub fn add_parcel<Env>(
        &self,
        shipment_id: Uuid,
        input: NewParcel,
    ) -> impl Effect<Output = Parcel, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        let max_attempts = self.max_code_attempts;
        from_fn(move |env: &Env| -> Result<Parcel, LifecycleError> {
            check(validate::validate_new_parcel(&input))?;

            let barcode = match &input.barcode {
                Some(barcode) => barcode.clone(),
                None => generate_unique(
                    env,
                    max_attempts,
                    "barcode",
                    codes::barcode_candidate,
                    |env, code| env.barcode_exists(code),
                )?,
            };

            let parcel = Parcel {
                id: Uuid::new_v4(),
                shipment_id,
                weight_kg: input.weight_kg,
                dimensions: input.dimensions.clone(),
                fragile: input.fragile,
                barcode,
                created_at: Utc::now(),
            };
            env.insert_parcel(&parcel)?;
            debug!(parcel = %parcel.id, shipment = %shipment_id, "parcel added");
            Ok(parcel)
        })
    }

    pub fn update_parcel<Env>(
        &self,
        parcel_id: Uuid,
        update: ParcelUpdate,
    ) -> impl Effect<Output = Parcel, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Parcel, LifecycleError> {
            check(validate::validate_parcel_update(&update))?;
            Ok(env.update_parcel(parcel_id, update.clone())?)
        })
    }

    pub fn remove_parcel<Env>(
        &self,
        parcel_id: Uuid,
    ) -> impl Effect<Output = (), Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<(), LifecycleError> {
            Ok(env.delete_parcel(parcel_id)?)
        })
    }

    pub fn parcels<Env>(
        &self,
        shipment_id: Uuid,
    ) -> impl Effect<Output = Vec<Parcel>, Error = LifecycleError, Env = Env>
    where
        Env: ShipmentStore + Clone + Send + Sync + 'static,
    {
        from_fn(move |env: &Env| -> Result<Vec<Parcel>, LifecycleError> {
            Ok(env.parcels_for_shipment(shipment_id)?)
        })
    }
}

fn check(
    validation: Validation<(), stillwater::NonEmptyVec<Violation>>,
) -> Result<(), LifecycleError> {
    match validation {
        Validation::Success(()) => Ok(()),
        Validation::Failure(violations) => Err(LifecycleError::Invalid(
            violations.iter().cloned().collect(),
        )),
    }
}

fn ensure_driver_exists<Env: ShipmentStore>(
    env: &Env,
    driver_id: DriverId,
) -> Result<(), LifecycleError> {
    if env.driver_exists(driver_id)? {
        Ok(())
    } else {
        Err(LifecycleError::UnknownDriver { driver_id })
    }
}

/// Generate-check-retry loop shared by tracking codes and barcodes.
/// Bounded: exhaustion is an error, never an infinite loop.
fn generate_unique<Env, G, C>(
    env: &Env,
    max_attempts: usize,
    what: &'static str,
    generate: G,
    exists: C,
) -> Result<String, LifecycleError>
where
    Env: ShipmentStore,
    G: Fn() -> String,
    C: Fn(&Env, &str) -> Result<bool, StoreError>,
{
    for attempt in 1..=max_attempts {
        let candidate = generate();
        if !exists(env, &candidate)? {
            return Ok(candidate);
        }
        tracing::warn!(what, attempt, "generated code collided, retrying");
    }
    Err(LifecycleError::GenerationExhausted {
        what,
        attempts: max_attempts,
    })
}
