use super::*;
use candle_core::Device;
use tempfile::TempDir;

fn create_test_store() -> (EmbeddingStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = EmbeddingStore::new(dir.path().join("embeddings"));
    (store, dir)
}

fn create_test_tensor(rows: usize, cols: usize) -> Tensor {
    let data: Vec<f32> = (0..rows * cols).map(|i| i as f32 * 0.5).collect();
    Tensor::from_vec(data, (rows, cols), &Device::Cpu).expect("tensor")
}

#[test]
fn test_path_for_numeric_and_text_ids() {
    let store = EmbeddingStore::new(PathBuf::from("/out"));

    assert_eq!(
        store.path_for(&QuestionId::from(42)),
        PathBuf::from("/out/42.npy")
    );
    assert_eq!(
        store.path_for(&QuestionId::from("q-7")),
        PathBuf::from("/out/q-7.npy")
    );
}

#[test]
fn test_save_and_load() {
    let (store, _dir) = create_test_store();
    let id = QuestionId::from(1);
    let tensor = create_test_tensor(5, 4);

    let path = store.save(&id, &tensor).expect("Failed to save");

    assert_eq!(path, store.path_for(&id));
    assert!(store.exists(&id));

    let loaded = store.load(&id).expect("Failed to load");
    assert_eq!(loaded.dims(), &[5, 4]);

    let expected: Vec<Vec<f32>> = tensor.to_vec2().expect("to_vec2");
    let actual: Vec<Vec<f32>> = loaded.to_vec2().expect("to_vec2");
    assert_eq!(actual, expected);
}

#[test]
fn test_save_creates_root() {
    let (store, _dir) = create_test_store();
    assert!(!store.root().exists());

    store
        .save(&QuestionId::from(1), &create_test_tensor(1, 2))
        .expect("Failed to save");

    assert!(store.root().is_dir());
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (store, _dir) = create_test_store();
    store
        .save(&QuestionId::from(3), &create_test_tensor(2, 2))
        .expect("Failed to save");

    let names: Vec<String> = fs::read_dir(store.root())
        .expect("read_dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["3.npy".to_string()]);
}

#[test]
fn test_save_overwrites() {
    let (store, _dir) = create_test_store();
    let id = QuestionId::from(9);

    store.save(&id, &create_test_tensor(3, 2)).expect("first save");
    store.save(&id, &create_test_tensor(6, 2)).expect("second save");

    assert_eq!(store.sequence_len(&id).expect("len"), 6);
}

#[test]
fn test_save_rejects_non_matrix() {
    let (store, _dir) = create_test_store();
    let flat = Tensor::from_vec(vec![1f32, 2.0, 3.0], 3, &Device::Cpu).expect("tensor");

    let result = store.save(&QuestionId::from(1), &flat);

    assert!(matches!(
        result,
        Err(StorageError::UnexpectedShape { ref dims, .. }) if dims == &vec![3]
    ));
}

#[test]
fn test_load_missing() {
    let (store, _dir) = create_test_store();

    let result = store.load(&QuestionId::from(404));

    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

#[test]
fn test_shape_of() {
    let (store, _dir) = create_test_store();
    let id = QuestionId::from("shape");
    store.save(&id, &create_test_tensor(7, 3)).expect("save");

    assert_eq!(store.shape_of(&id).expect("shape"), (7, 3));
    assert_eq!(store.sequence_len(&id).expect("len"), 7);
}

#[test]
fn test_shape_of_rejects_wrong_rank() {
    let (store, _dir) = create_test_store();
    let id = QuestionId::from(5);
    store.ensure_root().expect("root");

    let cube = Tensor::zeros((2, 2, 2), candle_core::DType::F32, &Device::Cpu).expect("tensor");
    cube.write_npy(store.path_for(&id)).expect("write");

    assert!(matches!(
        store.shape_of(&id),
        Err(StorageError::UnexpectedShape { .. })
    ));
}

#[test]
fn test_load_corrupt_file() {
    let (store, _dir) = create_test_store();
    let id = QuestionId::from(6);
    store.ensure_root().expect("root");
    fs::write(store.path_for(&id), b"not an npy file").expect("write");

    assert!(matches!(store.load(&id), Err(StorageError::Npy { .. })));
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let (store, _dir) = create_test_store();
    let id = QuestionId::from(8);
    // A non-empty directory at the final path cannot be replaced by a file.
    fs::create_dir_all(store.path_for(&id).join("occupied")).expect("mkdir");

    let result = store.save(&id, &create_test_tensor(2, 2));

    assert!(matches!(result, Err(StorageError::Io(_))));
    assert!(!store.temp_path_for(&id).exists());
    assert!(!store.exists(&id));
}

#[test]
fn test_unavailable_root_keeps_io_cause() {
    let dir = TempDir::new().expect("temp dir");
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"file").expect("write");
    let store = EmbeddingStore::new(blocker.join("embeddings"));

    match store.ensure_root() {
        Err(err @ StorageError::StorageUnavailable { .. }) => {
            assert!(std::error::Error::source(&err).is_some());
        }
        other => panic!("expected StorageUnavailable, got {:?}", other),
    }
}
