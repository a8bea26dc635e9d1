//! Simulated UC8157 panel: records every bus transfer and control line change.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as DigitalErrorType, InputPin, OutputPin};
use embedded_hal::spi::{ErrorType as SpiErrorType, Operation, SpiDevice};
use uc8157::prelude::*;

/// What the simulated controller saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ResetLow,
    ResetHigh,
    Command(u8),
    Data(Vec<u8>),
    BusyPoll,
}

/// Behaviour of the busy line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    /// Reports idle on the first poll
    Idle,
    /// Reports busy for this many polls, then idle
    For(u32),
    /// Never reports idle
    Stuck,
}

#[derive(Debug)]
struct State {
    events: Vec<Event>,
    dc_high: bool,
    busy: Busy,
    delayed_ns: u64,
}

#[derive(Clone)]
pub struct Sim(Rc<RefCell<State>>);

pub struct SimSpi(Sim);
pub struct SimBusy(Sim);
pub struct SimDc(Sim);
pub struct SimReset(Sim);
pub struct SimDelay(Sim);

pub type SimDriver = Uc8157<SimSpi, SimBusy, SimDc, SimReset, SimDelay>;

impl Sim {
    pub fn new() -> Self {
        Sim(Rc::new(RefCell::new(State {
            events: Vec::new(),
            dc_high: false,
            busy: Busy::Idle,
            delayed_ns: 0,
        })))
    }

    pub fn driver(&self) -> SimDriver {
        self.driver_with(Config::default())
    }

    pub fn driver_with(&self, config: Config) -> SimDriver {
        Uc8157::new(
            SimSpi(self.clone()),
            SimBusy(self.clone()),
            SimDc(self.clone()),
            SimReset(self.clone()),
            SimDelay(self.clone()),
            PanelModel::Gdew0102t4,
            config,
        )
    }

    pub fn set_busy(&self, busy: Busy) {
        self.0.borrow_mut().busy = busy;
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Events since the last call, busy polls included
    pub fn take_events(&self) -> Vec<Event> {
        std::mem::take(&mut self.0.borrow_mut().events)
    }

    /// Events since the last call without busy polls
    pub fn take_protocol(&self) -> Vec<Event> {
        self.take_events()
            .into_iter()
            .filter(|e| *e != Event::BusyPoll)
            .collect()
    }

    pub fn busy_polls(&self) -> usize {
        self.0
            .borrow()
            .events
            .iter()
            .filter(|e| **e == Event::BusyPoll)
            .count()
    }

    pub fn delayed_ms(&self) -> u64 {
        self.0.borrow().delayed_ns / 1_000_000
    }

    pub fn count_command(&self, command: u8) -> usize {
        self.0
            .borrow()
            .events
            .iter()
            .filter(|e| **e == Event::Command(command))
            .count()
    }
}

/// Payload sent right after the first occurrence of `command`
pub fn data_after(events: &[Event], command: u8) -> anyhow::Result<Vec<u8>> {
    let pos = events
        .iter()
        .position(|e| *e == Event::Command(command))
        .with_context(|| format!("command 0x{command:02X} not sent"))?;
    match events[pos + 1..].iter().find(|e| **e != Event::BusyPoll) {
        Some(Event::Data(data)) => Ok(data.clone()),
        other => Err(anyhow!("command 0x{command:02X} followed by {other:?}")),
    }
}

/// Commands in the order they were sent
pub fn commands(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Command(c) => Some(*c),
            _ => None,
        })
        .collect()
}

pub trait Checked<T> {
    fn checked(self) -> anyhow::Result<T>;
}

impl<T> Checked<T> for Result<T, DisplayError> {
    fn checked(self) -> anyhow::Result<T> {
        self.map_err(|e| anyhow!("display error: {e:?}"))
    }
}

impl SpiErrorType for SimSpi {
    type Error = Infallible;
}

impl SpiDevice<u8> for SimSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut state = (self.0).0.borrow_mut();
        for op in operations {
            if let Operation::Write(bytes) = op {
                if state.dc_high {
                    state.events.push(Event::Data(bytes.to_vec()));
                } else {
                    for &b in bytes.iter() {
                        state.events.push(Event::Command(b));
                    }
                }
            }
        }
        Ok(())
    }
}

impl DigitalErrorType for SimBusy {
    type Error = Infallible;
}

impl InputPin for SimBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut state = (self.0).0.borrow_mut();
        state.events.push(Event::BusyPoll);
        let idle = match state.busy {
            Busy::Idle => true,
            Busy::Stuck => false,
            Busy::For(0) => {
                state.busy = Busy::Idle;
                true
            }
            Busy::For(n) => {
                state.busy = Busy::For(n - 1);
                false
            }
        };
        Ok(idle)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl DigitalErrorType for SimDc {
    type Error = Infallible;
}

impl OutputPin for SimDc {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().dc_high = true;
        Ok(())
    }
}

impl DigitalErrorType for SimReset {
    type Error = Infallible;
}

impl OutputPin for SimReset {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().events.push(Event::ResetLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().events.push(Event::ResetHigh);
        Ok(())
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        (self.0).0.borrow_mut().delayed_ns += u64::from(ns);
    }
}
