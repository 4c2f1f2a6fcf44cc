#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::num::NonZeroUsize;
use tessel_queue::{Config, Owned, Queue, StorageMode};

#[derive(Arbitrary, Debug)]
enum Op {
    Add(u8),
    Replace { pos: u8, value: u8 },
    Delete(u8),
    DeleteReference(u8),
    Relocate { dest: u8, src: u8 },
    Insert { pos: u8, value: u8 },
    Swap { a: u8, b: u8 },
    Find(u8),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    linked: bool,
    ops: Vec<Op>,
}

fn fuzz(input: FuzzInput) {
    let mut cfg = Config::new(NonZeroUsize::new(1).unwrap());
    cfg.storage = if input.linked {
        StorageMode::LinkedList
    } else {
        StorageMode::Array
    };
    let mut queue = Queue::<Owned>::init(cfg);
    let mut model: Vec<u8> = Vec::new();
    let mut peak = 0;

    for op in input.ops {
        let len = model.len();
        match op {
            Op::Add(value) => {
                assert_eq!(queue.add(&[value]).unwrap(), len);
                model.push(value);
            }
            Op::Replace { pos, value } => {
                let pos = pos as usize;
                let result = queue.replace(pos, &[value]);
                if pos < len {
                    result.unwrap();
                    model[pos] = value;
                } else {
                    assert!(result.is_err());
                }
            }
            Op::Delete(pos) => {
                let pos = pos as usize;
                let result = queue.delete(pos);
                if pos < len {
                    result.unwrap();
                    model.remove(pos);
                } else {
                    assert!(result.is_err());
                }
            }
            Op::DeleteReference(pos) => {
                let pos = pos as usize;
                match queue.delete_reference(pos) {
                    Ok(item) => assert_eq!(item[0], model.remove(pos)),
                    Err(_) => assert!(pos >= len),
                }
            }
            Op::Relocate { dest, src } => {
                let (dest, src) = (dest as usize, src as usize);
                let result = queue.relocate(dest, src);
                if dest < len && src < len {
                    result.unwrap();
                    let value = model.remove(src);
                    model.insert(dest, value);
                } else {
                    assert!(result.is_err());
                }
            }
            Op::Insert { pos, value } => {
                let pos = pos as usize;
                let result = queue.insert(pos, &[value]);
                if pos <= len {
                    assert_eq!(result.unwrap(), pos);
                    model.insert(pos, value);
                } else {
                    assert!(result.is_err());
                }
            }
            Op::Swap { a, b } => {
                let (a, b) = (a as usize, b as usize);
                let result = queue.swap(a, b);
                if a < len && b < len && a != b {
                    result.unwrap();
                    model.swap(a, b);
                } else {
                    assert!(result.is_err());
                }
            }
            Op::Find(pos) => {
                if let Some(item) = queue.get(pos as usize).cloned() {
                    assert_eq!(queue.find(&item), Some(pos as usize));
                }
            }
        }

        peak = peak.max(model.len());
        assert_eq!(queue.len(), model.len());
        assert_eq!(queue.capacity(), peak);
    }

    let content: Vec<u8> = queue.iter().map(|item| item[0]).collect();
    assert_eq!(content, model);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
