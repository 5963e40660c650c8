/// Error type for malformed rule conditions in a survey document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// The `op` field names an operator that does not exist for this rule kind.
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    /// A comparison operator is missing one of its operands.
    #[error("Operator '{op}' requires a '{field}' operand")]
    MissingOperand { op: String, field: &'static str },

    /// A multi-aspect rule does not say which aspect it tests.
    #[error("Multi-aspect rules require an 'aspect' field (use \"*\" for any aspect)")]
    MissingAspect,

    /// An `aspect` field was given on a rule that is not attached to a multi-aspect question.
    #[error("The 'aspect' field is only allowed on multi-aspect rules")]
    UnexpectedAspect,
}
