use scale_model::{
    scale_enum, Compact, Decode, DecodeError, Encode, EncodeError, EncodeLength, OptionBool,
    Outcome, ParseError, TokenError, U128, DEFAULT_DEPTH_LIMIT,
};

fn compact<T: Into<U128>>(v: T) -> Vec<u8> {
    Compact(v.into()).to_bytes().unwrap()
}

#[test]
fn compact_boundary_table() {
    let table: Vec<(U128, Vec<u8>)> = vec![
        (0u8.into(), vec![0x00]),
        (1u8.into(), vec![0x04]),
        (4u8.into(), vec![0x10]),
        (63u8.into(), vec![0xfc]),
        (64u8.into(), vec![0x01, 0x01]),
        (16383u16.into(), vec![0xfd, 0xff]),
        (16384u16.into(), vec![0x02, 0x00, 0x01, 0x00]),
        (((1u32 << 30) - 1).into(), vec![0xfe, 0xff, 0xff, 0xff]),
        ((1u32 << 30).into(), vec![0x03, 0x00, 0x00, 0x00, 0x40]),
        (
            u64::MAX.into(),
            vec![0x13, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        ),
        (U128::MAX, {
            let mut v = vec![0x33];
            v.extend_from_slice(&[0xff; 16]);
            v
        }),
    ];

    for (value, bytes) in table {
        assert_eq!(compact(value), bytes, "encoding {}", value);
        assert_eq!(
            Compact::<U128>::from_bytes(&bytes).unwrap(),
            Compact(value),
            "decoding {:02x?}",
            bytes
        );
    }
}

#[test]
fn compact_mode_limits_are_inclusive() {
    assert_eq!(compact(63u8).len(), 1);
    assert_eq!(compact(64u8).len(), 2);
    assert_eq!(compact(16383u16).len(), 2);
    assert_eq!(compact(16384u16).len(), 4);
    assert_eq!(compact((1u32 << 30) - 1).len(), 4);
    assert_eq!(compact(1u32 << 30).len(), 5);
}

#[test]
fn compact_roundtrip_through_narrow_types() {
    for v in [0u32, 42, 1 << 14, 1 << 29, u32::MAX] {
        let bytes = Compact(v).to_bytes().unwrap();
        assert_eq!(Compact::<u32>::from_bytes(&bytes).unwrap().into_inner(), v);
        assert_eq!(Compact::<u64>::from_bytes(&bytes).unwrap().into_inner(), v as u64);
    }
}

#[test]
fn option_bool_table() {
    assert_eq!(OptionBool(None).to_bytes().unwrap(), vec![0x00]);
    assert_eq!(OptionBool(Some(true)).to_bytes().unwrap(), vec![0x01]);
    assert_eq!(OptionBool(Some(false)).to_bytes().unwrap(), vec![0x02]);
}

#[test]
fn tuple_composition() {
    let value = (Some(79u64), Ok::<bool, u8>(true));
    let bytes = value.to_bytes().unwrap();
    assert_eq!(
        bytes,
        vec![0x01, 0x4f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
    );
    assert_eq!(value.enc_len().unwrap(), bytes.len());
    assert_eq!(<(Option<u64>, Result<bool, u8>)>::from_bytes(&bytes).unwrap(), value);
}

scale_enum! {
    #[derive(Debug, PartialEq)]
    pub enum Tree {
        Leaf(Compact<u32>),
        Branch((Option<Box<Tree>>, Option<Box<Tree>>)),
        Marker,
    }
}

#[test]
fn enum_recursion_three_levels() {
    let tree = Tree::Branch((
        Some(Box::new(Tree::Branch((
            Some(Box::new(Tree::Branch((
                Some(Box::new(Tree::Leaf(Compact(64)))),
                None,
            )))),
            Some(Box::new(Tree::Marker)),
        )))),
        None,
    ));

    let bytes = tree.to_bytes().unwrap();
    assert_eq!(
        bytes,
        vec![
            0x01, // Branch
            0x01, 0x01, // Some(Branch
            0x01, 0x01, // Some(Branch
            0x01, 0x00, 0x01, 0x01, // Some(Leaf(Compact(64)))
            0x00, // None
            0x01, 0x02, // Some(Marker)
            0x00, // None
        ]
    );
    assert_eq!(Tree::from_bytes(&bytes).unwrap(), tree);
}

scale_enum! {
    #[derive(Debug, PartialEq)]
    pub enum Chain {
        End,
        Link(Option<Box<Chain>>),
    }
}

fn chain_bytes(links: usize) -> Vec<u8> {
    let mut bytes = [0x01u8, 0x01].repeat(links);
    bytes.push(0x00);
    bytes
}

#[test]
fn deep_chain_within_limit_decodes() {
    let bytes = chain_bytes(100);
    let chain = Chain::from_bytes(&bytes).unwrap();
    assert_eq!(chain.to_bytes().unwrap(), bytes);
}

#[test]
fn deep_chain_beyond_limit_is_rejected() {
    let bytes = chain_bytes(100_000);
    match Chain::from_bytes(&bytes) {
        Err(DecodeError::Parse(ParseError::DepthLimit { limit, offset })) => {
            assert_eq!(limit, DEFAULT_DEPTH_LIMIT);
            assert_eq!(offset, 2 * DEFAULT_DEPTH_LIMIT + 2);
        }
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
}

#[test]
fn bool_rejects_two() {
    match bool::from_bytes(&[0x02]) {
        Err(DecodeError::Parse(ParseError::Token(TokenError::InvalidBoolean(0x02)))) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn truncated_integer_is_short_read() {
    for bytes in [&[][..], &[0x01][..], &[0x01, 0x02, 0x03][..]] {
        match u32::from_bytes(bytes) {
            Err(DecodeError::Parse(err)) => assert!(err.is_short_read()),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

#[test]
fn unknown_enum_tag() {
    match Tree::from_bytes(&[0x03]) {
        Err(DecodeError::Parse(ParseError::Token(TokenError::InvalidEnumTag(tag)))) => {
            assert_eq!(tag.actual(), 0x03);
            assert!(tag.for_type().ends_with("Tree"));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn unset_outcome_is_empty_value() {
    let slot: Outcome<u32, bool> = Outcome::default();
    assert!(matches!(
        slot.to_bytes(),
        Err(EncodeError::EmptyValue { .. })
    ));
    assert!(matches!(
        (1u8, slot).to_bytes(),
        Err(EncodeError::EmptyValue { .. })
    ));
}

#[test]
fn signed_integers_share_layout() {
    assert_eq!((-2i32).to_bytes().unwrap(), (-2i32 as u32).to_bytes().unwrap());
    assert_eq!(i64::from_bytes(&[0xff; 8]).unwrap(), -1);
}
