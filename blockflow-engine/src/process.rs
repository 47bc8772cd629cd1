//! Process: block registry, link management, and the tick scheduler.
//!
//! A `Process` owns a set of named function blocks and evaluates them once
//! per tick, in registration order, with no dependency analysis. A consumer
//! registered before its producer reads the producer's previous-tick value;
//! the lag resolves itself after one tick and is the documented cost of the
//! fixed order.

use crate::report::{BlockSkip, SkipReason, TickReport};
use blockflow_core::block::{ComputeOutput, FunctionBlock, InputValues};
use blockflow_core::error::{BlockflowError, Result};
use blockflow_core::logging::{LogCategory, LogCollector, LogContext, NullCollector};
use blockflow_core::port::InputPort;
use blockflow_core::types::{BlockId, PortId};
use blockflow_core::value::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// How one input resolved during gathering.
enum Resolution {
    Resolved(Value),
    Missing,
    Dangling,
}

/// A container of function blocks evaluated once per tick.
///
/// All link mutations go through the process so both endpoints stay
/// consistent: an input's `source` and the matching entry in the source
/// output's `destinations` are always updated together.
///
/// `evaluate` takes `&mut self`; the exclusive borrow is the concurrency
/// contract. There is exactly one writer and no suspension points.
pub struct Process {
    name: String,
    /// Blocks in registration order. Replacing a block by name keeps its
    /// position here.
    blocks: Vec<FunctionBlock>,
    /// Handle of the block at the same position in `blocks`.
    ids: Vec<BlockId>,
    /// Name -> position.
    index: HashMap<String, usize>,
    /// Live handle -> position. Retired handles are absent.
    by_id: HashMap<BlockId, usize>,
    /// Next handle value. Monotonic, never reused.
    next_id: u64,
    tick: u64,
    collector: Arc<dyn LogCollector>,
}

impl Process {
    /// Create an empty process.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            ids: Vec::new(),
            index: HashMap::new(),
            by_id: HashMap::new(),
            next_id: 1,
            tick: 0,
            collector: Arc::new(NullCollector),
        }
    }

    /// Attach a log collector for structured evaluation events.
    pub fn with_collector(mut self, collector: Arc<dyn LogCollector>) -> Self {
        self.collector = collector;
        self
    }

    /// Process name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the process has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate blocks with their handles, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &FunctionBlock)> {
        self.ids.iter().copied().zip(self.blocks.iter())
    }

    /// Position of a block in the evaluation order, if its handle is live.
    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a block and return its handle.
    ///
    /// Re-registering a name replaces the prior block at its original
    /// position and retires the old handle; links held against the old
    /// handle resolve to nothing from then on.
    pub fn add_function_block(&mut self, block: FunctionBlock) -> BlockId {
        let id = BlockId::new(self.next_id);
        self.next_id += 1;

        let slot = match self.index.get(block.name()) {
            Some(&slot) => {
                let old_id = self.ids[slot];
                self.by_id.remove(&old_id);
                debug!(process = %self.name, block = %block.name(), %old_id, new_id = %id, "replacing block");
                self.context().info(
                    LogCategory::Graph,
                    format!("Replacing block '{}'", block.name()),
                );
                self.blocks[slot] = block;
                self.ids[slot] = id;
                slot
            }
            None => {
                let slot = self.blocks.len();
                self.index.insert(block.name().to_string(), slot);
                debug!(process = %self.name, block = %block.name(), %id, "adding block");
                self.blocks.push(block);
                self.ids.push(id);
                slot
            }
        };

        self.by_id.insert(id, slot);
        id
    }

    /// Remove a block by name, unlinking all of its ports from their
    /// counterparties first.
    pub fn remove_function_block(&mut self, name: &str) -> Result<FunctionBlock> {
        let id = self
            .block_id(name)
            .ok_or_else(|| BlockflowError::BlockNotFound {
                name: name.to_string(),
            })?;
        self.remove_block(id)
    }

    /// Remove a block by handle, unlinking all of its ports from their
    /// counterparties first. The handle is retired.
    pub fn remove_block(&mut self, id: BlockId) -> Result<FunctionBlock> {
        let slot = *self
            .by_id
            .get(&id)
            .ok_or(BlockflowError::StaleHandle { block: id })?;

        // Gather both sides of every link before touching anything.
        let mut inbound: Vec<(PortId, PortId)> = Vec::new();
        let mut outbound: Vec<(PortId, PortId)> = Vec::new();
        {
            let block = &self.blocks[slot];
            for input in &block.inputs {
                if let Some(src) = &input.source {
                    inbound.push((src.clone(), PortId::new(id, &input.name)));
                }
            }
            for output in &block.outputs {
                let src = PortId::new(id, &output.name);
                for dest in &output.destinations {
                    outbound.push((src.clone(), dest.clone()));
                }
            }
        }

        for (src, dest) in &inbound {
            if src.block == id {
                continue;
            }
            if let Some(&s) = self.by_id.get(&src.block) {
                if let Some(output) = self.blocks[s].get_output_mut(&src.name) {
                    output.remove_destination(dest);
                }
            }
        }
        for (src, dest) in &outbound {
            if dest.block == id {
                continue;
            }
            if let Some(&d) = self.by_id.get(&dest.block) {
                if let Some(input) = self.blocks[d].get_input_mut(&dest.name) {
                    if input.source.as_ref() == Some(src) {
                        input.source = None;
                    }
                }
            }
        }

        self.by_id.remove(&id);
        let block = self.blocks.remove(slot);
        self.ids.remove(slot);
        self.index.remove(block.name());

        // Positions after the removed slot shifted down by one.
        for i in slot..self.blocks.len() {
            self.by_id.insert(self.ids[i], i);
            self.index.insert(self.blocks[i].name().to_string(), i);
        }

        debug!(process = %self.name, block = %block.name(), %id, "removed block");
        self.context().info(
            LogCategory::Graph,
            format!("Removed block '{}'", block.name()),
        );

        Ok(block)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Handle of the block with the given name.
    pub fn block_id(&self, name: &str) -> Option<BlockId> {
        self.index.get(name).map(|&slot| self.ids[slot])
    }

    /// Look up a block by handle.
    pub fn block(&self, id: BlockId) -> Result<&FunctionBlock> {
        let slot = *self
            .by_id
            .get(&id)
            .ok_or(BlockflowError::StaleHandle { block: id })?;
        Ok(&self.blocks[slot])
    }

    /// Look up a block by handle, mutably.
    pub fn block_mut(&mut self, id: BlockId) -> Result<&mut FunctionBlock> {
        let slot = *self
            .by_id
            .get(&id)
            .ok_or(BlockflowError::StaleHandle { block: id })?;
        Ok(&mut self.blocks[slot])
    }

    /// Look up a block by name.
    pub fn block_by_name(&self, name: &str) -> Result<&FunctionBlock> {
        let slot = *self
            .index
            .get(name)
            .ok_or_else(|| BlockflowError::BlockNotFound {
                name: name.to_string(),
            })?;
        Ok(&self.blocks[slot])
    }

    /// Build a port handle from block and port names, verifying the port
    /// exists.
    pub fn port_id(&self, block: &str, port: &str) -> Result<PortId> {
        let slot = *self
            .index
            .get(block)
            .ok_or_else(|| BlockflowError::BlockNotFound {
                name: block.to_string(),
            })?;
        let id = self.ids[slot];
        let b = &self.blocks[slot];
        if b.get_input(port).is_none() && b.get_output(port).is_none() {
            return Err(BlockflowError::PortNotFound {
                port: PortId::new(id, port),
            });
        }
        Ok(PortId::new(id, port))
    }

    /// Value an input port would see right now: the source's cache if
    /// linked, else the default. `None` means the input is unsatisfied.
    pub fn input_value(&self, port: &PortId) -> Result<Option<Value>> {
        let block = self.block(port.block)?;
        let input = block
            .get_input(&port.name)
            .ok_or_else(|| BlockflowError::PortNotFound { port: port.clone() })?;
        Ok(match self.resolve_input(input) {
            Resolution::Resolved(v) => Some(v),
            Resolution::Missing | Resolution::Dangling => None,
        })
    }

    /// Cached value of an output port. `None` until the block first writes
    /// the port.
    pub fn output_value(&self, port: &PortId) -> Result<Option<Value>> {
        let block = self.block(port.block)?;
        let output = block
            .get_output(&port.name)
            .ok_or_else(|| BlockflowError::PortNotFound { port: port.clone() })?;
        Ok(output.value.clone())
    }

    // =========================================================================
    // Linking
    // =========================================================================

    /// Link an output port to an input port.
    ///
    /// Fails fast if either handle is stale, either port is missing, or
    /// the directions are wrong. Relinking an already-bound input first
    /// removes it from the old source's destinations. Repeating an
    /// existing link is a no-op.
    pub fn link(&mut self, source: &PortId, dest: &PortId) -> Result<()> {
        let src_slot = *self
            .by_id
            .get(&source.block)
            .ok_or(BlockflowError::StaleHandle {
                block: source.block,
            })?;
        {
            let b = &self.blocks[src_slot];
            if b.get_output(&source.name).is_none() {
                return Err(if b.get_input(&source.name).is_some() {
                    BlockflowError::InvalidLinkSource {
                        port: source.clone(),
                    }
                } else {
                    BlockflowError::PortNotFound {
                        port: source.clone(),
                    }
                });
            }
        }

        let dst_slot = *self
            .by_id
            .get(&dest.block)
            .ok_or(BlockflowError::StaleHandle { block: dest.block })?;
        {
            let b = &self.blocks[dst_slot];
            if b.get_input(&dest.name).is_none() {
                return Err(if b.get_output(&dest.name).is_some() {
                    BlockflowError::InvalidLinkTarget { port: dest.clone() }
                } else {
                    BlockflowError::PortNotFound { port: dest.clone() }
                });
            }
        }

        // Rebinding: detach the input from its previous source first.
        let old_source = self.blocks[dst_slot]
            .get_input(&dest.name)
            .and_then(|i| i.source.clone());
        if let Some(old) = old_source {
            if old != *source {
                if let Some(&s) = self.by_id.get(&old.block) {
                    if let Some(output) = self.blocks[s].get_output_mut(&old.name) {
                        output.remove_destination(dest);
                    }
                }
            }
        }

        if let Some(input) = self.blocks[dst_slot].get_input_mut(&dest.name) {
            input.source = Some(source.clone());
        }
        if let Some(output) = self.blocks[src_slot].get_output_mut(&source.name) {
            output.add_destination(dest.clone());
        }

        debug!(process = %self.name, %source, %dest, "linked");
        self.context()
            .debug(LogCategory::Link, format!("Linked {} -> {}", source, dest));
        Ok(())
    }

    /// Remove the binding of an input port, on both sides.
    ///
    /// The old source keeps its cached value. Unlinking an unbound input
    /// is a no-op.
    pub fn unlink(&mut self, dest: &PortId) -> Result<()> {
        let dst_slot = *self
            .by_id
            .get(&dest.block)
            .ok_or(BlockflowError::StaleHandle { block: dest.block })?;
        let input = self.blocks[dst_slot]
            .get_input_mut(&dest.name)
            .ok_or_else(|| BlockflowError::PortNotFound { port: dest.clone() })?;

        let Some(source) = input.source.take() else {
            return Ok(());
        };

        if let Some(&s) = self.by_id.get(&source.block) {
            if let Some(output) = self.blocks[s].get_output_mut(&source.name) {
                output.remove_destination(dest);
            }
        }

        debug!(process = %self.name, %source, %dest, "unlinked");
        self.context().debug(
            LogCategory::Link,
            format!("Unlinked {} -> {}", source, dest),
        );
        Ok(())
    }

    /// Remove every link fed by an output port, on both sides.
    pub fn unlink_all(&mut self, source: &PortId) -> Result<()> {
        let src_slot = *self
            .by_id
            .get(&source.block)
            .ok_or(BlockflowError::StaleHandle {
                block: source.block,
            })?;
        let output = self.blocks[src_slot]
            .get_output_mut(&source.name)
            .ok_or_else(|| BlockflowError::PortNotFound {
                port: source.clone(),
            })?;

        let destinations = std::mem::take(&mut output.destinations);
        for dest in &destinations {
            if let Some(&d) = self.by_id.get(&dest.block) {
                if let Some(input) = self.blocks[d].get_input_mut(&dest.name) {
                    if input.source.as_ref() == Some(source) {
                        input.source = None;
                    }
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Run one evaluation pass over every block, in registration order.
    ///
    /// Each block's `display_priority` is overwritten with its zero-based
    /// pass index. For each enabled block the inputs are gathered (linked
    /// source cache, else default), the computation runs, and its result is
    /// written to the output caches: a scalar broadcasts to every output, a
    /// value list maps positionally, a short list leaves trailing outputs
    /// stale. Blocks with unresolved inputs, failing computations, or
    /// over-length results are skipped and reported; a skip never aborts
    /// the tick.
    pub fn evaluate(&mut self) -> TickReport {
        self.tick += 1;
        let tick = self.tick;
        let ctx = self.context().at_tick(tick);

        debug!(process = %self.name, tick, "tick started");
        ctx.debug(LogCategory::Tick, format!("Tick {} started", tick));

        let mut executed = Vec::new();
        let mut skipped = Vec::new();

        for slot in 0..self.blocks.len() {
            self.blocks[slot].display_priority = slot as u32;
            let id = self.ids[slot];

            if !self.blocks[slot].enabled {
                skipped.push(BlockSkip {
                    block: id,
                    name: self.blocks[slot].name().to_string(),
                    reason: SkipReason::Disabled,
                });
                continue;
            }

            let (inputs, unresolved) = self.gather_inputs(slot);
            if let Some(reason) = unresolved {
                let name = self.blocks[slot].name().to_string();
                warn!(process = %self.name, block = %name, tick, ?reason, "block skipped");
                ctx.for_block(id)
                    .warn(LogCategory::Block, format!("Block '{}' skipped", name));
                skipped.push(BlockSkip {
                    block: id,
                    name,
                    reason,
                });
                continue;
            }

            match self.blocks[slot].compute(&inputs) {
                Err(e) => {
                    let name = self.blocks[slot].name().to_string();
                    warn!(process = %self.name, block = %name, tick, error = %e, "compute failed");
                    ctx.for_block(id).error(
                        LogCategory::Block,
                        format!("Compute failed in '{}': {}", name, e),
                    );
                    skipped.push(BlockSkip {
                        block: id,
                        name,
                        reason: SkipReason::ComputeFailed {
                            message: e.to_string(),
                        },
                    });
                }
                Ok(None) => {
                    // No outputs this tick; caches untouched.
                    executed.push(id);
                }
                Ok(Some(ComputeOutput::Scalar(value))) => {
                    for output in &mut self.blocks[slot].outputs {
                        output.set_value(value.clone());
                    }
                    executed.push(id);
                }
                Ok(Some(ComputeOutput::Values(values))) => {
                    let declared = self.blocks[slot].outputs.len();
                    if values.len() > declared {
                        let name = self.blocks[slot].name().to_string();
                        warn!(
                            process = %self.name, block = %name, tick,
                            declared, produced = values.len(),
                            "output mismatch, no outputs written"
                        );
                        ctx.for_block(id).error(
                            LogCategory::Block,
                            format!(
                                "Output mismatch in '{}': {} declared, {} produced",
                                name,
                                declared,
                                values.len()
                            ),
                        );
                        skipped.push(BlockSkip {
                            block: id,
                            name,
                            reason: SkipReason::OutputMismatch {
                                declared,
                                produced: values.len(),
                            },
                        });
                    } else {
                        for (output, value) in self.blocks[slot].outputs.iter_mut().zip(values) {
                            output.set_value(value);
                        }
                        executed.push(id);
                    }
                }
            }
        }

        debug!(
            process = %self.name, tick,
            executed = executed.len(), skipped = skipped.len(),
            "tick completed"
        );
        ctx.info(
            LogCategory::Tick,
            format!(
                "Tick {} completed: {} executed, {} skipped",
                tick,
                executed.len(),
                skipped.len()
            ),
        );

        TickReport {
            tick,
            executed,
            skipped,
        }
    }

    /// Gather input values for one block, scanning every input even after
    /// the first unresolved one. Returns the first skip reason, if any.
    fn gather_inputs(&self, slot: usize) -> (InputValues, Option<SkipReason>) {
        let block = &self.blocks[slot];
        let mut values = InputValues::with_capacity(block.inputs.len());
        let mut unresolved = None;

        for input in &block.inputs {
            match self.resolve_input(input) {
                Resolution::Resolved(value) => {
                    values.insert(input.name.clone(), value);
                }
                Resolution::Missing => {
                    if unresolved.is_none() {
                        unresolved = Some(SkipReason::MissingInput {
                            input: input.name.clone(),
                        });
                    }
                }
                Resolution::Dangling => {
                    if unresolved.is_none() {
                        unresolved = Some(SkipReason::DanglingSource {
                            input: input.name.clone(),
                        });
                    }
                }
            }
        }

        (values, unresolved)
    }

    /// Resolve one input: linked source cache (null if the source never
    /// computed), else default, else unsatisfied.
    fn resolve_input(&self, input: &InputPort) -> Resolution {
        if let Some(src) = &input.source {
            let Some(&slot) = self.by_id.get(&src.block) else {
                return Resolution::Dangling;
            };
            let Some(output) = self.blocks[slot].get_output(&src.name) else {
                return Resolution::Dangling;
            };
            return Resolution::Resolved(output.get_value());
        }
        if let Some(default) = &input.default {
            return Resolution::Resolved(default.clone());
        }
        Resolution::Missing
    }

    fn context(&self) -> LogContext {
        LogContext::new(Arc::clone(&self.collector)).with_process(self.name.clone())
    }
}

/// A bound pair of ports, for callers that want to treat a link as a
/// first-class object rather than driving the two-sided operations by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// The output end.
    pub source: PortId,
    /// The input end.
    pub destination: PortId,
}

impl Link {
    /// Create the link in the process and return it.
    pub fn connect(process: &mut Process, source: PortId, destination: PortId) -> Result<Self> {
        process.link(&source, &destination)?;
        Ok(Self {
            source,
            destination,
        })
    }

    /// Remove the link from the process, if it is still the one bound.
    ///
    /// If the destination has since been rebound to a different source,
    /// this is a no-op.
    pub fn disconnect(&self, process: &mut Process) -> Result<()> {
        let block = process.block(self.destination.block)?;
        let still_bound = block
            .get_input(&self.destination.name)
            .is_some_and(|i| i.source.as_ref() == Some(&self.source));
        if still_bound {
            process.unlink(&self.destination)?;
        }
        Ok(())
    }
}
