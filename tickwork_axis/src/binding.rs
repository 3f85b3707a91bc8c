// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding axes to live scales.
//!
//! Constructing a scale may be asynchronous, so binding is split in two: `begin_*` takes a
//! generation number and hands back a future that builds the scale, and `commit*` applies the
//! result, unless a newer request was started in the meantime, in which case the result is
//! discarded. Nothing is mutated before a commit, so a failed build leaves the previous scale
//! bound.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::future::Future;

use crate::scale::{ScaleDescriptor, ScaleEvent, ScaleHandle, Subscription};
use crate::value::Value;

/// Builds scales from descriptors.
pub trait ScaleFactory {
    /// Constructs a scale. The future may await nested resources.
    fn build(
        &self,
        descriptor: &ScaleDescriptor,
    ) -> impl Future<Output = Result<ScaleHandle, BindError>>;
}

/// Builds scales synchronously.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateFactory;

impl ScaleFactory for ImmediateFactory {
    fn build(
        &self,
        descriptor: &ScaleDescriptor,
    ) -> impl Future<Output = Result<ScaleHandle, BindError>> {
        core::future::ready(Ok(ScaleHandle::from_descriptor(descriptor)))
    }
}

/// Why a bind or a render could not proceed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The factory rejected the descriptor.
    #[error("scale construction rejected: {0}")]
    Rejected(String),
    /// The axis has no primary scale yet.
    #[error("no scale is bound to the axis")]
    NoScaleBound,
    /// An offset refers to the container's perpendicular scale, which is not set.
    #[error("the container has no perpendicular scale to offset against")]
    MissingContainerScale,
}

/// How a commit ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindOutcome {
    /// The new scale is bound.
    Applied,
    /// A newer request was started first; the result was dropped.
    Superseded,
}

/// Notifications queued by bound scales, drained by the axis in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisEvent {
    /// The primary scale's domain changed.
    DomainChanged,
    /// The offset scale's domain changed.
    OffsetDomainChanged,
    /// Emphasis requested.
    Highlight,
    /// Emphasis cleared.
    Unhighlight,
}

impl AxisEvent {
    /// Whether the event came from the offset scale.
    pub fn is_offset(&self) -> bool {
        matches!(self, Self::OffsetDomainChanged)
    }
}

type EventQueue = Rc<RefCell<VecDeque<AxisEvent>>>;

/// A pending primary bind.
#[derive(Debug)]
#[must_use = "a bind only takes effect once committed"]
pub struct BindTicket {
    generation: u64,
}

/// A pending offset bind.
#[derive(Debug)]
#[must_use = "a bind only takes effect once committed"]
pub struct OffsetTicket {
    generation: u64,
    value: Value,
}

#[derive(Debug)]
struct Bound {
    handle: ScaleHandle,
    _subscription: Subscription,
}

/// The scale an axis is offset against, and the value it crosses at.
#[derive(Debug)]
pub struct OffsetBinding {
    handle: ScaleHandle,
    value: Value,
    subscription: Option<Subscription>,
}

impl OffsetBinding {
    /// The offset scale.
    pub fn handle(&self) -> &ScaleHandle {
        &self.handle
    }

    /// The crossing value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the scale was built for this axis rather than borrowed from the container.
    pub fn is_dedicated(&self) -> bool {
        self.subscription.is_some()
    }
}

/// The primary and offset scales bound to one axis.
#[derive(Debug, Default)]
pub struct ScaleBinding {
    primary: Option<Bound>,
    offset: Option<OffsetBinding>,
    generation: u64,
    offset_generation: u64,
    events: EventQueue,
}

impl ScaleBinding {
    /// An empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bound primary scale.
    pub fn primary(&self) -> Option<&ScaleHandle> {
        self.primary.as_ref().map(|b| &b.handle)
    }

    /// The bound offset.
    pub fn offset(&self) -> Option<&OffsetBinding> {
        self.offset.as_ref()
    }

    /// Starts building a primary scale.
    ///
    /// The returned future borrows only the factory, so several binds may be in flight.
    pub fn begin_bind<'f, F: ScaleFactory>(
        &mut self,
        factory: &'f F,
        descriptor: ScaleDescriptor,
    ) -> (
        BindTicket,
        impl Future<Output = Result<ScaleHandle, BindError>> + use<'f, F>,
    ) {
        self.generation += 1;
        log::debug!("bind #{} started for {:?} scale", self.generation, descriptor.kind);
        let ticket = BindTicket {
            generation: self.generation,
        };
        (ticket, async move { factory.build(&descriptor).await })
    }

    /// Applies a finished primary bind.
    ///
    /// On success the previous scale's subscriptions are dropped and the new scale's domain
    /// and highlight notifications are routed to the axis.
    pub fn commit(
        &mut self,
        ticket: BindTicket,
        result: Result<ScaleHandle, BindError>,
    ) -> Result<BindOutcome, BindError> {
        if ticket.generation != self.generation {
            log::debug!(
                "bind #{} superseded by #{}",
                ticket.generation,
                self.generation
            );
            return Ok(BindOutcome::Superseded);
        }
        let handle = result.inspect_err(|err| {
            log::debug!("bind #{} failed: {err}", ticket.generation);
        })?;
        self.attach(handle);
        Ok(BindOutcome::Applied)
    }

    /// Binds an already constructed scale, superseding any bind in flight.
    pub fn set_primary(&mut self, handle: ScaleHandle) {
        self.generation += 1;
        self.attach(handle);
    }

    fn attach(&mut self, handle: ScaleHandle) {
        // Notifications already queued by the released scale no longer apply.
        self.drop_events(|event| !event.is_offset());
        let events = self.events.clone();
        let subscription = handle.subscribe(move |event| {
            let event = match event {
                ScaleEvent::DomainChanged => AxisEvent::DomainChanged,
                ScaleEvent::HighlightAxis => AxisEvent::Highlight,
                ScaleEvent::UnhighlightAxis => AxisEvent::Unhighlight,
            };
            events.borrow_mut().push_back(event);
        });
        // Replacing the old binding drops its subscription.
        self.primary = Some(Bound {
            handle,
            _subscription: subscription,
        });
    }

    /// Removes the offset, superseding any offset bind in flight.
    pub fn clear_offset(&mut self) {
        self.offset_generation += 1;
        self.drop_events(AxisEvent::is_offset);
        self.offset = None;
    }

    /// Offsets against a scale owned by someone else (the container's perpendicular scale).
    ///
    /// The scale is used as-is: it is not clamped and its notifications are not observed.
    pub fn set_shared_offset(&mut self, handle: ScaleHandle, value: Value) {
        self.offset_generation += 1;
        self.drop_events(AxisEvent::is_offset);
        self.offset = Some(OffsetBinding {
            handle,
            value,
            subscription: None,
        });
    }

    /// Starts building a dedicated offset scale.
    pub fn begin_bind_offset<'f, F: ScaleFactory>(
        &mut self,
        factory: &'f F,
        descriptor: ScaleDescriptor,
        value: Value,
    ) -> (
        OffsetTicket,
        impl Future<Output = Result<ScaleHandle, BindError>> + use<'f, F>,
    ) {
        self.offset_generation += 1;
        log::debug!(
            "offset bind #{} started for {:?} scale",
            self.offset_generation,
            descriptor.kind
        );
        let ticket = OffsetTicket {
            generation: self.offset_generation,
            value,
        };
        (ticket, async move { factory.build(&descriptor).await })
    }

    /// Applies a finished offset bind.
    ///
    /// Continuous offset scales are clamped so the axis never leaves the plot. Domain changes
    /// of the offset scale are routed to the axis.
    pub fn commit_offset(
        &mut self,
        ticket: OffsetTicket,
        result: Result<ScaleHandle, BindError>,
    ) -> Result<BindOutcome, BindError> {
        if ticket.generation != self.offset_generation {
            log::debug!(
                "offset bind #{} superseded by #{}",
                ticket.generation,
                self.offset_generation
            );
            return Ok(BindOutcome::Superseded);
        }
        let handle = result.inspect_err(|err| {
            log::debug!("offset bind #{} failed: {err}", ticket.generation);
        })?;
        if handle.kind().is_continuous() {
            handle.set_clamp(true);
        }
        self.drop_events(AxisEvent::is_offset);
        let events = self.events.clone();
        let subscription = handle.subscribe(move |event| {
            if event == ScaleEvent::DomainChanged {
                events.borrow_mut().push_back(AxisEvent::OffsetDomainChanged);
            }
        });
        self.offset = Some(OffsetBinding {
            handle,
            value: ticket.value,
            subscription: Some(subscription),
        });
        Ok(BindOutcome::Applied)
    }

    /// Removes queued notifications matching `stale`, keeping the rest in order.
    fn drop_events(&self, stale: impl Fn(&AxisEvent) -> bool) {
        let mut events = self.events.borrow_mut();
        let before = events.len();
        events.retain(|event| !stale(event));
        if events.len() != before {
            log::debug!("dropped {} stale scale notification(s)", before - events.len());
        }
    }

    /// Takes the oldest queued notification.
    pub fn next_event(&self) -> Option<AxisEvent> {
        self.events.borrow_mut().pop_front()
    }

    /// Number of queued notifications.
    pub fn pending_events(&self) -> usize {
        self.events.borrow().len()
    }
}
