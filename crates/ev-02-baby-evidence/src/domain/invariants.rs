//! # Domain Invariants

use super::errors::BabyEvidenceError;
use shared_types::{ChainId, FaultModel, NodeRef};

/// Invariant: the sample contains at least one correct node under the
/// fault model (`len >= f + 1`).
pub fn invariant_sample_reaches_correct(
    sample: &[NodeRef],
    fault_model: &FaultModel,
) -> Result<(), BabyEvidenceError> {
    if !fault_model.sample_reaches_correct(sample.len()) {
        return Err(BabyEvidenceError::SampleTooSmall {
            got: sample.len(),
            required: fault_model.min_sample_size(),
        });
    }
    Ok(())
}

/// Invariant: every sampled node is a full node of `chain`.
pub fn invariant_sample_on_chain(
    sample: &[NodeRef],
    chain: &ChainId,
) -> Result<(), BabyEvidenceError> {
    match sample.iter().find(|node| node.chain != *chain) {
        Some(node) => Err(BabyEvidenceError::ForeignNode {
            node: node.clone(),
            chain: chain.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(chain: &str, count: usize) -> Vec<NodeRef> {
        (0..count)
            .map(|i| NodeRef::new(format!("node-{i}"), ChainId::new(chain)))
            .collect()
    }

    #[test]
    fn test_sample_size_follows_fault_model() {
        let model = FaultModel::new(1, 4).unwrap();
        assert!(invariant_sample_reaches_correct(&nodes("baby", 2), &model).is_ok());
        assert!(matches!(
            invariant_sample_reaches_correct(&nodes("baby", 1), &model),
            Err(BabyEvidenceError::SampleTooSmall {
                got: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn test_foreign_node_rejected() {
        let chain = ChainId::new("baby");
        let mut sample = nodes("baby", 2);
        assert!(invariant_sample_on_chain(&sample, &chain).is_ok());

        sample.push(NodeRef::new("intruder", ChainId::new("other")));
        assert!(matches!(
            invariant_sample_on_chain(&sample, &chain),
            Err(BabyEvidenceError::ForeignNode { .. })
        ));
    }
}
