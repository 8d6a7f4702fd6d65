use thiserror::Error;

/// Double-buffered simulation state written by exactly one compute pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimVariable {
    FlowField,
    FlowDirection,
    Position,
}

impl SimVariable {
    pub const ALL: [SimVariable; 3] = [
        SimVariable::FlowField,
        SimVariable::FlowDirection,
        SimVariable::Position,
    ];

    pub fn index(self) -> usize {
        match self {
            SimVariable::FlowField => 0,
            SimVariable::FlowDirection => 1,
            SimVariable::Position => 2,
        }
    }
}

/// Read-only texture supplied from outside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalTexture {
    BasePosition,
    TargetPosition,
}

/// Which version of a variable a pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickEdge {
    /// Value left by the previous tick.
    PreviousTick,
    /// Value written earlier in the current tick; orders the writer first.
    SameTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassInput {
    Variable(SimVariable, TickEdge),
    External(ExternalTexture),
}

/// One compute pass: its shader, ordered inputs (binding order) and the variable it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassDescriptor {
    pub label: &'static str,
    pub shader: &'static str,
    pub inputs: Vec<PassInput>,
    pub output: SimVariable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("{0:?} is written by more than one pass")]
    DuplicateWriter(SimVariable),
    #[error("pass `{0}` reads its own output within the same tick")]
    SelfDependency(&'static str),
    #[error("pass `{pass}` reads {variable:?}, which no pass writes")]
    MissingWriter {
        pass: &'static str,
        variable: SimVariable,
    },
    #[error("same-tick dependency cycle between passes {0:?}")]
    Cycle(Vec<&'static str>),
}

/// An input resolved to a concrete texture for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundInput {
    Buffer { variable: SimVariable, slot: usize },
    External(ExternalTexture),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPass<'a> {
    /// Declaration index of the pass.
    pub index: usize,
    pub descriptor: &'a PassDescriptor,
    pub inputs: Vec<BoundInput>,
    pub output_slot: usize,
}

/// Validated, topologically ordered set of passes plus the ping-pong slot of each variable.
#[derive(Debug, Clone)]
pub struct ComputeGraph {
    passes: Vec<PassDescriptor>,
    order: Vec<usize>,
    /// Slot holding the most recent value of each variable.
    current: [usize; 3],
}

impl ComputeGraph {
    pub fn new(passes: Vec<PassDescriptor>) -> Result<Self, GraphError> {
        let mut writers: [Option<usize>; 3] = [None; 3];
        for (index, pass) in passes.iter().enumerate() {
            let writer = &mut writers[pass.output.index()];
            if writer.is_some() {
                return Err(GraphError::DuplicateWriter(pass.output));
            }
            *writer = Some(index);
        }

        // dependencies[i] lists the passes that must run before pass i.
        let mut dependencies = vec![Vec::new(); passes.len()];
        for (index, pass) in passes.iter().enumerate() {
            for input in &pass.inputs {
                let PassInput::Variable(variable, edge) = *input else {
                    continue;
                };
                let Some(writer) = writers[variable.index()] else {
                    return Err(GraphError::MissingWriter {
                        pass: pass.label,
                        variable,
                    });
                };
                if edge == TickEdge::SameTick {
                    if writer == index {
                        return Err(GraphError::SelfDependency(pass.label));
                    }
                    if !dependencies[index].contains(&writer) {
                        dependencies[index].push(writer);
                    }
                }
            }
        }

        let order = schedule(&dependencies).map_err(|stuck| {
            GraphError::Cycle(stuck.into_iter().map(|i| passes[i].label).collect())
        })?;

        Ok(Self {
            passes,
            order,
            current: [0; 3],
        })
    }

    pub fn passes(&self) -> &[PassDescriptor] {
        &self.passes
    }

    /// Pass indices in execution order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn current_slot(&self, variable: SimVariable) -> usize {
        self.current[variable.index()]
    }

    /// Resolves every input and output of this tick to a buffer slot, in execution order.
    pub fn plan_tick(&self) -> Vec<PlannedPass<'_>> {
        self.order
            .iter()
            .map(|&index| {
                let descriptor = &self.passes[index];
                let inputs = descriptor
                    .inputs
                    .iter()
                    .map(|input| match *input {
                        PassInput::Variable(variable, TickEdge::PreviousTick) => {
                            BoundInput::Buffer {
                                variable,
                                slot: self.current_slot(variable),
                            }
                        }
                        PassInput::Variable(variable, TickEdge::SameTick) => BoundInput::Buffer {
                            variable,
                            slot: 1 - self.current_slot(variable),
                        },
                        PassInput::External(texture) => BoundInput::External(texture),
                    })
                    .collect();
                PlannedPass {
                    index,
                    descriptor,
                    inputs,
                    output_slot: 1 - self.current_slot(descriptor.output),
                }
            })
            .collect()
    }

    /// Makes this tick's outputs the current value of every written variable.
    pub fn finish_tick(&mut self) {
        for pass in &self.passes {
            let slot = &mut self.current[pass.output.index()];
            *slot = 1 - *slot;
        }
    }
}

/// Kahn's algorithm; among ready passes the earliest declared runs first.
/// On a cycle, returns the passes that could not be scheduled.
fn schedule(dependencies: &[Vec<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let count = dependencies.len();
    let mut in_degree: Vec<usize> = dependencies.iter().map(Vec::len).collect();
    let mut scheduled = vec![false; count];
    let mut order = Vec::with_capacity(count);

    while order.len() < count {
        let Some(next) = (0..count).find(|&i| !scheduled[i] && in_degree[i] == 0) else {
            return Err((0..count).filter(|&i| !scheduled[i]).collect());
        };
        scheduled[next] = true;
        order.push(next);
        for (index, deps) in dependencies.iter().enumerate() {
            if deps.contains(&next) {
                in_degree[index] -= 1;
            }
        }
    }

    Ok(order)
}

/// The flow-direction, flow-field and position passes driving the morph.
pub fn morph_simulation_passes() -> Vec<PassDescriptor> {
    use PassInput::{External, Variable};
    use SimVariable::{FlowDirection, FlowField, Position};
    use TickEdge::{PreviousTick, SameTick};

    vec![
        PassDescriptor {
            label: "flow_direction",
            shader: "shaders/flow_direction.wgsl",
            inputs: vec![
                Variable(Position, PreviousTick),
                Variable(FlowField, PreviousTick),
                Variable(FlowDirection, PreviousTick),
            ],
            output: FlowDirection,
        },
        PassDescriptor {
            label: "flow_field",
            shader: "shaders/flow_field.wgsl",
            inputs: vec![
                Variable(Position, PreviousTick),
                Variable(FlowField, PreviousTick),
            ],
            output: FlowField,
        },
        PassDescriptor {
            label: "position",
            shader: "shaders/position.wgsl",
            inputs: vec![
                Variable(Position, PreviousTick),
                Variable(FlowField, SameTick),
                Variable(FlowDirection, SameTick),
                External(ExternalTexture::BasePosition),
                External(ExternalTexture::TargetPosition),
            ],
            output: Position,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(graph: &ComputeGraph) -> Vec<&'static str> {
        graph
            .order()
            .iter()
            .map(|&i| graph.passes()[i].label)
            .collect()
    }

    fn pass(label: &'static str, output: SimVariable, inputs: Vec<PassInput>) -> PassDescriptor {
        PassDescriptor {
            label,
            shader: "",
            inputs,
            output,
        }
    }

    #[test]
    fn morph_passes_run_position_last() {
        let graph = ComputeGraph::new(morph_simulation_passes()).unwrap();
        assert_eq!(
            labels(&graph),
            vec!["flow_direction", "flow_field", "position"]
        );
    }

    #[test]
    fn same_tick_edges_override_declaration_order() {
        let graph = ComputeGraph::new(vec![
            pass(
                "position",
                SimVariable::Position,
                vec![PassInput::Variable(SimVariable::FlowField, TickEdge::SameTick)],
            ),
            pass("field", SimVariable::FlowField, vec![]),
        ])
        .unwrap();
        assert_eq!(labels(&graph), vec!["field", "position"]);
    }

    #[test]
    fn plan_reads_previous_and_same_tick_slots() {
        let mut graph = ComputeGraph::new(morph_simulation_passes()).unwrap();

        let plan = graph.plan_tick();
        let position = &plan[2];
        assert_eq!(position.descriptor.label, "position");
        assert_eq!(position.index, 2);
        assert_eq!(position.output_slot, 1);
        assert_eq!(
            position.inputs,
            vec![
                BoundInput::Buffer {
                    variable: SimVariable::Position,
                    slot: 0
                },
                BoundInput::Buffer {
                    variable: SimVariable::FlowField,
                    slot: 1
                },
                BoundInput::Buffer {
                    variable: SimVariable::FlowDirection,
                    slot: 1
                },
                BoundInput::External(ExternalTexture::BasePosition),
                BoundInput::External(ExternalTexture::TargetPosition),
            ]
        );

        graph.finish_tick();
        for variable in SimVariable::ALL {
            assert_eq!(graph.current_slot(variable), 1);
        }

        let plan = graph.plan_tick();
        assert_eq!(plan[2].output_slot, 0);
        assert_eq!(
            plan[0].inputs[0],
            BoundInput::Buffer {
                variable: SimVariable::Position,
                slot: 1
            }
        );
    }

    #[test]
    fn rejects_two_writers() {
        let result = ComputeGraph::new(vec![
            pass("a", SimVariable::Position, vec![]),
            pass("b", SimVariable::Position, vec![]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            GraphError::DuplicateWriter(SimVariable::Position)
        );
    }

    #[test]
    fn rejects_same_tick_self_read() {
        let result = ComputeGraph::new(vec![pass(
            "position",
            SimVariable::Position,
            vec![PassInput::Variable(SimVariable::Position, TickEdge::SameTick)],
        )]);
        assert_eq!(result.unwrap_err(), GraphError::SelfDependency("position"));
    }

    #[test]
    fn rejects_reads_without_writer() {
        let result = ComputeGraph::new(vec![pass(
            "position",
            SimVariable::Position,
            vec![PassInput::Variable(
                SimVariable::FlowField,
                TickEdge::PreviousTick,
            )],
        )]);
        assert_eq!(
            result.unwrap_err(),
            GraphError::MissingWriter {
                pass: "position",
                variable: SimVariable::FlowField,
            }
        );
    }

    #[test]
    fn rejects_same_tick_cycles() {
        let result = ComputeGraph::new(vec![
            pass(
                "field",
                SimVariable::FlowField,
                vec![PassInput::Variable(
                    SimVariable::FlowDirection,
                    TickEdge::SameTick,
                )],
            ),
            pass(
                "direction",
                SimVariable::FlowDirection,
                vec![PassInput::Variable(SimVariable::FlowField, TickEdge::SameTick)],
            ),
            pass("position", SimVariable::Position, vec![]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            GraphError::Cycle(vec!["field", "direction"])
        );
    }
}
