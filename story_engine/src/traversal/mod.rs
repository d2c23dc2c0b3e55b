//! Traversal Engine - walks a listener through the story graph.
//!
//! The state machine:
//! 1. **AtNarrative(n)**: tell the segment, then move to the highest-priority
//!    question. A segment without questions continues to the next segment
//!    when there is one; otherwise the story ends
//! 2. **AtQuestion(q, failed)**: get the listener's answer and ask the judge
//!    - correct: continue to the segment after `q`
//!    - wrong: add `q` to `failed` and pick another sibling; when none is
//!      left, continue to the segment after `q` anyway
//!
//! [`StoryPlayer::play`] drives this to the end of the story.
//! [`StoryPlayer::leave_narrative`] and [`StoryPlayer::submit_answer`] expose
//! single transitions for front-ends that own the loop. Both paths select
//! questions through [`select_question`].

mod selection;

pub use selection::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use story_graph::{GraphError, NodeId, StoryGraph};

use crate::collaborators::{AnswerJudge, Listener};
use crate::error::EngineError;
use crate::events::StoryEvent;

/// Unique identifier for a traversal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalState {
    AtNarrative(NodeId),
    AtQuestion { node: NodeId, failed: FailedSet },
}

impl TraversalState {
    /// The start of every story: the root segment.
    pub fn initial() -> Self {
        TraversalState::AtNarrative(NodeId::root())
    }

    pub fn node_id(&self) -> &NodeId {
        match self {
            TraversalState::AtNarrative(node) => node,
            TraversalState::AtQuestion { node, .. } => node,
        }
    }
}

/// How the story leaves a narrative node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeExit {
    /// Ask this question next.
    Ask(NodeId),
    /// No questions at this breakpoint; continue to this segment.
    Skip(NodeId),
    /// Nothing follows; the story is over.
    End,
}

/// Result of judging one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Failed questions at this breakpoint, including this one when wrong.
    pub failed: FailedSet,
    pub next: TraversalState,
}

/// Record of a completed play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playthrough {
    pub session: SessionId,
    pub events: Vec<StoryEvent>,
    /// The terminal segment.
    pub final_node: NodeId,
}

impl Playthrough {
    /// Nodes visited after the starting segment, in order.
    ///
    /// A play-through started at a question has no starting segment, so its
    /// first question is part of the path.
    pub fn path(&self) -> Vec<&NodeId> {
        let starting_segment = matches!(self.events.first(), Some(StoryEvent::Narrated { .. }));
        self.events
            .iter()
            .filter_map(|event| match event {
                StoryEvent::Narrated { node, .. } | StoryEvent::QuestionAsked { node, .. } => {
                    Some(node)
                }
                _ => None,
            })
            .skip(usize::from(starting_segment))
            .collect()
    }

    /// How many answers the judge accepted.
    pub fn correct_answers(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, StoryEvent::Answered { correct: true, .. }))
            .count()
    }
}

/// Plays one session over a borrowed graph.
pub struct StoryPlayer<'g, J> {
    graph: &'g StoryGraph,
    judge: J,
    session: SessionId,
}

impl<'g, J: AnswerJudge> StoryPlayer<'g, J> {
    /// Create a player for a new session.
    pub fn new(graph: &'g StoryGraph, judge: J) -> Self {
        Self {
            graph,
            judge,
            session: SessionId::new(),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn graph(&self) -> &'g StoryGraph {
        self.graph
    }

    /// Transition out of the narrative node `id`.
    pub fn leave_narrative(&self, id: &NodeId) -> Result<NarrativeExit, EngineError> {
        if let Some(question) = select_question(self.graph, id, &FailedSet::new())? {
            return Ok(NarrativeExit::Ask(question));
        }
        match self.graph.bridged_successor(id) {
            Some(next) => Ok(NarrativeExit::Skip(next.clone())),
            None => Ok(NarrativeExit::End),
        }
    }

    /// Judge `listener_answer` to `question_id` and decide where to go next.
    ///
    /// `failed` holds the questions already failed at this breakpoint.
    pub fn submit_answer(
        &self,
        question_id: &NodeId,
        listener_answer: &str,
        failed: &FailedSet,
    ) -> Result<AnswerOutcome, EngineError> {
        let question = self.graph.question(question_id)?;
        let (anchor, next) = match (question.parent(), question.next()) {
            (Some(anchor), Some(next)) => (anchor, next),
            _ => return Err(GraphError::DanglingQuestion(question_id.clone()).into()),
        };
        let content = self.graph.node(anchor)?.content();

        let correct = self
            .judge
            .evaluate(content, question.question(), &question.answer, listener_answer)
            .map_err(EngineError::collaborator("answer judge"))?;

        tracing::debug!(
            session = %self.session,
            question = %question_id,
            correct,
            "judged answer"
        );

        if correct {
            return Ok(AnswerOutcome {
                correct,
                failed: failed.clone(),
                next: TraversalState::AtNarrative(next.clone()),
            });
        }

        let mut failed = failed.clone();
        failed.insert(question_id.clone());
        let next = match select_question(self.graph, anchor, &failed)? {
            Some(sibling) => TraversalState::AtQuestion {
                node: sibling,
                failed: failed.clone(),
            },
            None => TraversalState::AtNarrative(next.clone()),
        };

        Ok(AnswerOutcome {
            correct,
            failed,
            next,
        })
    }

    /// Play from the root segment to the end of the story.
    pub fn play<L: Listener + ?Sized>(&self, listener: &mut L) -> Result<Playthrough, EngineError> {
        self.play_from(TraversalState::initial(), listener)
    }

    /// Play from `state` to the end of the story.
    ///
    /// # Errors
    ///
    /// Lookup and structural errors from a corrupted graph, `GraphError::Cycle`
    /// if a segment comes around twice, and collaborator failures from the
    /// listener or the judge. None of these are retried.
    pub fn play_from<L: Listener + ?Sized>(
        &self,
        state: TraversalState,
        listener: &mut L,
    ) -> Result<Playthrough, EngineError> {
        tracing::info!(session = %self.session, start = %state.node_id(), "starting play-through");

        let mut events = Vec::new();
        let mut told = HashSet::new();
        let mut state = state;

        loop {
            state = match state {
                TraversalState::AtNarrative(id) => {
                    if !told.insert(id.clone()) {
                        return Err(GraphError::Cycle(id).into());
                    }
                    let content = self.graph.narrative(&id)?.content.clone();
                    events.push(StoryEvent::Narrated {
                        node: id.clone(),
                        content,
                    });

                    match self.leave_narrative(&id)? {
                        NarrativeExit::Ask(question) => TraversalState::AtQuestion {
                            node: question,
                            failed: FailedSet::new(),
                        },
                        NarrativeExit::Skip(next) => {
                            tracing::debug!(session = %self.session, from = %id, to = %next, "no questions at breakpoint");
                            events.push(StoryEvent::SegmentSkipped {
                                from: id,
                                to: next.clone(),
                            });
                            TraversalState::AtNarrative(next)
                        }
                        NarrativeExit::End => {
                            tracing::info!(session = %self.session, node = %id, "story finished");
                            events.push(StoryEvent::Finished { node: id.clone() });
                            return Ok(Playthrough {
                                session: self.session,
                                events,
                                final_node: id,
                            });
                        }
                    }
                }
                TraversalState::AtQuestion { node, failed } => {
                    let question = self.graph.question(&node)?;
                    events.push(StoryEvent::QuestionAsked {
                        node: node.clone(),
                        question: question.question().to_string(),
                        difficulty: question.difficulty,
                    });

                    let listener_answer = listener
                        .answer(question)
                        .map_err(EngineError::collaborator("listener"))?;
                    let outcome = self.submit_answer(&node, &listener_answer, &failed)?;
                    events.push(StoryEvent::Answered {
                        node: node.clone(),
                        listener_answer,
                        correct: outcome.correct,
                    });

                    if let (false, TraversalState::AtNarrative(next)) = (outcome.correct, &outcome.next) {
                        tracing::warn!(
                            session = %self.session,
                            failed = outcome.failed.len(),
                            "all questions at breakpoint failed, continuing story"
                        );
                        events.push(StoryEvent::QuestionsExhausted {
                            breakpoint: question.parent().cloned().unwrap_or_else(|| node.clone()),
                            next: next.clone(),
                        });
                    }
                    outcome.next
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ExpectedAnswerJudge, ScriptedListener};
    use story_graph::{create_graph, load, save, Difficulty, QuestionAnswer};

    fn two_breakpoint_graph() -> StoryGraph {
        create_graph(
            "Seg0||Seg1||Seg2",
            "||",
            &[
                vec![QuestionAnswer::new("Q0a", "Ans0a", Difficulty::Easy)],
                vec![QuestionAnswer::new("Q1a", "Ans1a", Difficulty::Hard)],
            ],
            "English",
        )
        .unwrap()
    }

    fn three_choice_graph() -> StoryGraph {
        create_graph(
            "Before.||After.",
            "||",
            &[vec![
                QuestionAnswer::new("easy?", "e", Difficulty::Easy),
                QuestionAnswer::new("hard?", "h", Difficulty::Hard),
                QuestionAnswer::new("medium?", "m", Difficulty::Medium),
            ]],
            "English",
        )
        .unwrap()
    }

    #[test]
    fn test_correct_answers_follow_story() {
        let graph = two_breakpoint_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["Ans0a", "Ans1a"]);

        let playthrough = player.play(&mut listener).unwrap();

        let path: Vec<&str> = playthrough.path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, ["question_0_0", "story_1", "question_1_0", "story_2"]);
        assert_eq!(playthrough.final_node, NodeId::story(2));
        assert_eq!(playthrough.correct_answers(), 2);
        assert!(playthrough.events.last().unwrap().is_terminal());
    }

    #[test]
    fn test_hard_question_asked_first() {
        let graph = three_choice_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        assert_eq!(
            player.leave_narrative(&NodeId::story(0)).unwrap(),
            NarrativeExit::Ask(NodeId::question(0, 1))
        );
    }

    #[test]
    fn test_wrong_answer_falls_back_by_difficulty() {
        let graph = three_choice_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["wrong", "m"]);

        let playthrough = player.play(&mut listener).unwrap();

        let path: Vec<&str> = playthrough.path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, ["question_0_1", "question_0_2", "story_1"]);
        assert!(!playthrough
            .events
            .iter()
            .any(|e| matches!(e, StoryEvent::QuestionsExhausted { .. })));
    }

    #[test]
    fn test_exhausted_questions_continue_story() {
        let graph = three_choice_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["x", "y", "z"]);

        let playthrough = player.play(&mut listener).unwrap();

        let path: Vec<&str> = playthrough.path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, ["question_0_1", "question_0_2", "question_0_0", "story_1"]);
        assert!(playthrough.events.contains(&StoryEvent::QuestionsExhausted {
            breakpoint: NodeId::story(0),
            next: NodeId::story(1),
        }));
        assert_eq!(playthrough.final_node, NodeId::story(1));
    }

    #[test]
    fn test_submit_answer_single_steps() {
        let graph = three_choice_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);

        let outcome = player
            .submit_answer(&NodeId::question(0, 1), "nope", &FailedSet::new())
            .unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.next.node_id(), &NodeId::question(0, 2));

        let outcome = player
            .submit_answer(&NodeId::question(0, 2), "m", &outcome.failed)
            .unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.next, TraversalState::AtNarrative(NodeId::story(1)));
    }

    #[test]
    fn test_single_step_matches_query() {
        let graph = three_choice_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut failed = FailedSet::new();
        let mut current = NodeId::question(0, 1);

        loop {
            let outcome = player.submit_answer(&current, "wrong", &failed).unwrap();
            let expected = next_question_node_id(&graph, &current, &outcome.failed).unwrap();
            match outcome.next {
                TraversalState::AtQuestion { node, failed: f } => {
                    assert_eq!(Some(node.clone()), expected);
                    current = node;
                    failed = f;
                }
                TraversalState::AtNarrative(node) => {
                    assert_eq!(expected, None);
                    assert_eq!(node, NodeId::story(1));
                    break;
                }
            }
        }
    }

    #[test]
    fn test_breakpoint_without_questions_is_skipped() {
        let graph = create_graph(
            "A||B||C",
            "||",
            &[vec![], vec![QuestionAnswer::new("Q", "Ans", Difficulty::Easy)]],
            "English",
        )
        .unwrap();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["Ans"]);

        let playthrough = player.play(&mut listener).unwrap();

        assert_eq!(
            playthrough.events[1],
            StoryEvent::SegmentSkipped {
                from: NodeId::story(0),
                to: NodeId::story(1),
            }
        );
        assert_eq!(playthrough.final_node, NodeId::story(2));
    }

    #[test]
    fn test_play_from_mid_story() {
        let graph = two_breakpoint_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["Ans1a"]);

        let playthrough = player
            .play_from(TraversalState::AtNarrative(NodeId::story(1)), &mut listener)
            .unwrap();
        let path: Vec<&str> = playthrough.path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, ["question_1_0", "story_2"]);
    }

    #[test]
    fn test_listener_failure_propagates() {
        let graph = two_breakpoint_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(Vec::<String>::new());

        let result = player.play(&mut listener);
        assert!(matches!(
            result,
            Err(EngineError::Collaborator { role: "listener", .. })
        ));
    }

    #[test]
    fn test_missing_start_node_is_lookup_error() {
        let graph = two_breakpoint_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["Ans1a"]);

        let result = player.play_from(TraversalState::AtNarrative(NodeId::story(8)), &mut listener);
        assert!(matches!(
            result,
            Err(EngineError::Graph(GraphError::NodeNotFound(_)))
        ));
    }

    #[test]
    fn test_sessions_are_distinct() {
        let graph = two_breakpoint_graph();
        let a = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let b = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        assert_ne!(a.session(), b.session());
    }

    #[test]
    fn test_path_from_question_keeps_first_question() {
        let graph = three_choice_graph();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["h"]);

        let playthrough = player
            .play_from(
                TraversalState::AtQuestion {
                    node: NodeId::question(0, 1),
                    failed: FailedSet::new(),
                },
                &mut listener,
            )
            .unwrap();

        let path: Vec<&str> = playthrough.path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, ["question_0_1", "story_1"]);
    }

    #[test]
    fn test_revisited_segment_is_cycle() {
        let mut record = save(&two_breakpoint_graph()).unwrap();
        record["nodes"]["question_0_0"]["children"] = serde_json::json!(["story_0"]);
        let graph = load(&record).unwrap();
        let player = StoryPlayer::new(&graph, ExpectedAnswerJudge);
        let mut listener = ScriptedListener::new(["Ans0a"]);

        let result = player.play(&mut listener);
        assert!(matches!(
            result,
            Err(EngineError::Graph(GraphError::Cycle(id))) if id == NodeId::story(0)
        ));
    }
}
