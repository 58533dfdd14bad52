use tempfile::TempDir;
use xsproof::store::{proof_filename, ProofStore};

#[test]
fn creates_format_subdirectory_lazily() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("snapshots");
    assert!(!root.exists());

    let store = ProofStore::new(&root);
    let path = store
        .save("http://target/?q=x", "<script>alert(1)</script>", b"jpegbytes")
        .unwrap();

    assert!(path.starts_with(root.join("jpg")));
    assert_eq!(std::fs::read(&path).unwrap(), b"jpegbytes");
}

#[test]
fn repeated_saves_are_idempotent_on_directories() {
    let dir = TempDir::new().unwrap();
    let store = ProofStore::new(dir.path());

    // Second save must not fail on the already-existing jpg/ directory.
    store.save("http://t/a", "p1", b"one").unwrap();
    store.save("http://t/a", "p2", b"two").unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path().join("jpg"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn distinct_payloads_get_distinct_files() {
    let dir = TempDir::new().unwrap();
    let store = ProofStore::new(dir.path());

    let a = store.save("http://t/?q=1", "<svg onload=alert(1)>", b"a").unwrap();
    let b = store.save("http://t/?q=1", "<img src=x onerror=alert(1)>", b"b").unwrap();

    assert_ne!(a, b);
    assert!(a.exists());
    assert!(b.exists());
    // Neither write clobbered the other.
    assert_eq!(std::fs::read(&a).unwrap(), b"a");
    assert_eq!(std::fs::read(&b).unwrap(), b"b");
}

#[test]
fn same_tuple_at_different_timestamps_never_overwrites() {
    let a = proof_filename("http://t/?q=1", "<script>alert(1)</script>", 1700000000);
    let b = proof_filename("http://t/?q=1", "<script>alert(1)</script>", 1700000007);
    assert_ne!(a, b);

    // Both names resolve under the same format directory.
    let dir = TempDir::new().unwrap();
    let jpg = dir.path().join("jpg");
    std::fs::create_dir_all(&jpg).unwrap();
    std::fs::write(jpg.join(&a), b"first").unwrap();
    std::fs::write(jpg.join(&b), b"second").unwrap();
    assert_eq!(std::fs::read(jpg.join(&a)).unwrap(), b"first");
    assert_eq!(std::fs::read(jpg.join(&b)).unwrap(), b"second");
}

#[test]
fn unwritable_root_degrades_to_storage_error() {
    let store = ProofStore::new("/proc/xsproof-nope");
    let err = store.save("http://t/", "p", b"bytes").unwrap_err();
    assert!(matches!(err, xsproof::errors::XsProofError::Storage(_)));
}
