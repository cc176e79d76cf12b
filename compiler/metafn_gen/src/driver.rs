//! Processing Driver
//!
//! A host build presents declarations in rounds. Every round is scanned;
//! the round flagged `processing_over` additionally emits every class
//! definition, exactly once. Any error is fatal: the processor refuses
//! further rounds and nothing more is written.

use metafn_ir::{ClassDefinition, GeneratorConfig, MethodElement};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::class_emitter::{ClassEmitter, EmitError};
use crate::filer::Filer;
use crate::scanner::{DeclarationScanner, ScanError};

/// One round of declarations from the host.
#[derive(Copy, Clone, Debug)]
pub struct Round<'a> {
    pub elements: &'a [MethodElement],
    /// No further rounds follow; emit now.
    pub processing_over: bool,
}

impl<'a> Round<'a> {
    /// An intermediate round.
    pub fn new(elements: &'a [MethodElement]) -> Self {
        Round {
            elements,
            processing_over: false,
        }
    }

    /// The final round.
    pub fn last(elements: &'a [MethodElement]) -> Self {
        Round {
            elements,
            processing_over: true,
        }
    }
}

/// What a successful round did.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum RoundOutcome {
    /// Methods added this round; nothing written yet.
    Collected { methods: usize },
    /// Final round: methods added this round and the units written.
    Emitted { methods: usize, units: Vec<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("processing already finished; generated units are emitted once")]
    Finished,

    #[error("processing was aborted by an earlier error")]
    Aborted,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum State {
    Collecting,
    Finished,
    Failed,
}

/// Drives scanning and emission across host rounds.
pub struct Processor {
    scanner: DeclarationScanner,
    state: State,
    rounds: u32,
}

impl Processor {
    pub fn new(config: GeneratorConfig) -> Self {
        Processor {
            scanner: DeclarationScanner::new(config),
            state: State::Collecting,
            rounds: 0,
        }
    }

    pub fn scanner(&self) -> &DeclarationScanner {
        &self.scanner
    }

    /// Whether the single emission has happened.
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Process one round.
    ///
    /// # Errors
    ///
    /// Scanning and emission errors are returned as is and poison the
    /// processor: later rounds fail with [`ProcessError::Aborted`]. Rounds
    /// after the final one fail with [`ProcessError::Finished`].
    pub fn process(
        &mut self,
        round: Round<'_>,
        filer: &mut dyn Filer,
    ) -> Result<RoundOutcome, ProcessError> {
        match self.state {
            State::Finished => return Err(ProcessError::Finished),
            State::Failed => return Err(ProcessError::Aborted),
            State::Collecting => {}
        }
        self.rounds += 1;

        let result = self.run(round, filer);
        self.state = match (&result, round.processing_over) {
            (Err(_), _) => State::Failed,
            (Ok(_), true) => State::Finished,
            (Ok(_), false) => State::Collecting,
        };
        result
    }

    fn run(&mut self, round: Round<'_>, filer: &mut dyn Filer) -> Result<RoundOutcome, ProcessError> {
        let methods = self.scanner.collect(round.elements)?;
        debug!(round = self.rounds, methods, "scanned round");

        if !round.processing_over {
            return Ok(RoundOutcome::Collected { methods });
        }

        let classes = self.scanner.classes();
        let units = emit_all(&classes, self.scanner.config(), filer)?;
        info!(
            rounds = self.rounds,
            classes = units.len(),
            methods = self.scanner.method_count(),
            "generated overloads"
        );
        Ok(RoundOutcome::Emitted { methods, units })
    }
}

/// Emit every class definition, in order.
///
/// All output names are checked before anything is written, so two types
/// mapping to the same unit fail without partial output.
///
/// # Errors
///
/// [`EmitError::OutputCollision`] for clashing output names, otherwise the
/// first write failure; emission stops there.
pub fn emit_all(
    classes: &[&ClassDefinition],
    config: &GeneratorConfig,
    filer: &mut dyn Filer,
) -> Result<Vec<String>, EmitError> {
    let mut owners: FxHashMap<String, String> = FxHashMap::default();
    for class in classes {
        let output = class.output_qualified_name(&config.suffix);
        let qualified = class.qualified_name();
        if let Some(first) = owners.get(&output) {
            return Err(EmitError::OutputCollision {
                output,
                first: first.clone(),
                second: qualified,
            });
        }
        owners.insert(output, qualified);
    }

    let emitter = ClassEmitter::new(config);
    classes
        .iter()
        .map(|class| emitter.emit(class, filer))
        .collect()
}
