use approx::assert_abs_diff_eq;
use ferrite_loss::{registry, Batch, Labels, Loss, LossError, RegisteredLoss};
use serde_json::json;

fn scores() -> Batch {
    Batch::zeros(3, 3)
}

fn labels() -> Labels {
    Labels::Sparse(vec![0, 1, 1])
}

#[test]
fn categorical_crossentropy_builds_and_runs() {
    let built = registry::from_config(&json!({"@losses": "CategoricalCrossentropy.v1"})).unwrap();
    assert_eq!(built.name(), "CategoricalCrossentropy.v1");
    let ce = match built {
        RegisteredLoss::CategoricalCrossentropy(ce) => ce,
        other => panic!("unexpected loss: {other:?}"),
    };

    let grad = ce.get_grad(&scores(), &labels()).unwrap();
    assert_eq!(grad.shape(), (3, 3));
    // Zero scores against one-hot targets, normalized by the three rows.
    let (loss, grad_again) = ce.get_both(&scores(), &labels()).unwrap();
    assert_abs_diff_eq!(loss, 1.0 / 3.0, epsilon = 1e-4);
    assert_abs_diff_eq!(
        ce.get_loss(&scores(), &labels()).unwrap(),
        loss,
        epsilon = 1e-6
    );
    assert_eq!(grad_again, grad);
}

#[test]
fn sequence_categorical_crossentropy_builds_and_runs() {
    let built =
        registry::from_config(&json!({"@losses": "SequenceCategoricalCrossentropy.v1"})).unwrap();
    let seq = match built {
        RegisteredLoss::SequenceCategoricalCrossentropy(seq) => seq,
        other => panic!("unexpected loss: {other:?}"),
    };

    let guesses = vec![scores()];
    let truths = vec![labels()];
    let grads = seq.get_grad(&guesses, &truths).unwrap();
    assert_eq!(grads.len(), 1);
    assert_eq!(grads[0].shape(), (3, 3));
    // One step, so normalization divides by one: three full misses.
    let (loss, _) = seq.get_both(&guesses, &truths).unwrap();
    assert_abs_diff_eq!(loss, 3.0, epsilon = 1e-4);
}

#[test]
fn l2_distance_builds_and_runs() {
    let built = registry::from_config(&json!({"@losses": "L2Distance.v1"})).unwrap();
    let l2 = match built {
        RegisteredLoss::L2Distance(l2) => l2,
        other => panic!("unexpected loss: {other:?}"),
    };

    let grad = l2.get_grad(&scores(), &scores()).unwrap();
    assert_eq!(grad.shape(), (3, 3));
    let (loss, _) = l2.get_both(&scores(), &scores()).unwrap();
    assert_abs_diff_eq!(loss, 0.0, epsilon = 1e-6);
}

#[test]
fn cosine_distance_builds_and_runs() {
    let built = registry::from_config(
        &json!({"@losses": "CosineDistance.v1", "normalize": true, "ignore_zeros": true}),
    )
    .unwrap();
    let cosine = match built {
        RegisteredLoss::CosineDistance(cosine) => cosine,
        other => panic!("unexpected loss: {other:?}"),
    };
    assert!(cosine.normalize);
    assert!(cosine.ignore_zeros);

    // All-zero rows are ignored, so the self-distance of zeros is zero.
    let grad = cosine.get_grad(&scores(), &scores()).unwrap();
    assert_eq!(grad.shape(), (3, 3));
    assert!(grad.data().iter().all(|&v| v == 0.0));
    let (loss, _) = cosine.get_both(&scores(), &scores()).unwrap();
    assert_abs_diff_eq!(loss, 0.0, epsilon = 1e-6);
}

#[test]
fn flat_option_maps_build_without_a_config_block() {
    let options = json!({"normalize": false}).as_object().cloned().unwrap();
    let built = registry::make("CategoricalCrossentropy.v1", &options).unwrap();
    match built {
        RegisteredLoss::CategoricalCrossentropy(ce) => assert!(!ce.normalize),
        other => panic!("unexpected loss: {other:?}"),
    }
}

#[test]
fn bad_configs_fail_before_first_use() {
    let unknown_name = registry::from_config(&json!({"@losses": "Hinge.v1"})).unwrap_err();
    assert!(matches!(unknown_name, LossError::InvalidConfig(_)));

    let unknown_key =
        registry::from_config(&json!({"@losses": "L2Distance.v1", "normalise": true})).unwrap_err();
    assert!(matches!(unknown_key, LossError::InvalidConfig(_)));

    let bad_type = registry::from_config(&json!({"@losses": "CosineDistance.v1", "normalize": 1}))
        .unwrap_err();
    assert!(matches!(bad_type, LossError::InvalidConfig(_)));
}
