// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! End to end rendering through the public API

use filtergen_render::{
    ArtifactKind, AsnSet, Capability, Dialect, Entry, IpVer, LenMatch, Prefix, RadixTree,
    RenderError, RenderInput, RenderRequest, RenderRequestBuilder, capabilities, lookup, render,
};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

fn request(dialect: Dialect, kind: ArtifactKind) -> RenderRequestBuilder {
    let mut builder = RenderRequestBuilder::default();
    builder.dialect(dialect).kind(kind);
    builder
}

fn to_string(request: &RenderRequest, asns: &AsnSet, tree: &RadixTree) -> String {
    let mut out = Vec::new();
    render(request, &RenderInput::new(asns, tree), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn customers() -> AsnSet {
    [65003, 65001, 65002].into_iter().collect()
}

fn no_prefixes() -> RadixTree {
    RadixTree::new(IpVer::V4)
}

#[test]
fn cisco_as_path_for_customers() {
    let request = request(Dialect::Cisco, ArtifactKind::AsPath)
        .name("CUSTOMERS")
        .asn(65000)
        .aswidth(2)
        .build()
        .unwrap();
    assert_eq!(
        to_string(&request, &customers(), &no_prefixes()),
        "no ip as-path access-list CUSTOMERS\n\
         ip as-path access-list CUSTOMERS permit ^65000(_[0-9]+)*_(65001|65002)$\n\
         ip as-path access-list CUSTOMERS permit ^65000(_[0-9]+)*_(65003)$\n"
    );
}

#[test]
fn unbounded_width_makes_one_clause() {
    let request = request(Dialect::Cisco, ArtifactKind::AsPath)
        .name("CUSTOMERS")
        .asn(65000)
        .aswidth(usize::MAX)
        .build()
        .unwrap();
    assert_eq!(
        to_string(&request, &customers(), &no_prefixes()),
        "no ip as-path access-list CUSTOMERS\n\
         ip as-path access-list CUSTOMERS permit ^65000(_[0-9]+)*_(65001|65002|65003)$\n"
    );
}

#[test]
fn json_as_set_parses() {
    let request = request(Dialect::Json, ArtifactKind::AsSet)
        .name("AS-CUSTOMERS")
        .build()
        .unwrap();
    let out = to_string(&request, &customers(), &no_prefixes());
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, serde_json::json!({"AS-CUSTOMERS": [65001, 65002, 65003]}));
}

#[test]
fn huawei_empty_prefix_list() {
    let request = request(Dialect::Huawei, ArtifactKind::PrefixList)
        .name("R1")
        .build()
        .unwrap();
    assert_eq!(
        to_string(&request, &AsnSet::new(), &no_prefixes()),
        "undo ip ip-prefix R1\nip ip-prefix R1 deny 0.0.0.0/0\n"
    );
}

#[test]
fn format_template() {
    let tree = RadixTree::from_entries(
        IpVer::V4,
        [Entry::exact(Prefix::expect_from("10.0.0.0/24"))],
    )
    .unwrap();
    let request = request(Dialect::Format, ArtifactKind::PrefixList)
        .template("%n/%l-%h;")
        .build()
        .unwrap();
    assert_eq!(
        to_string(&request, &AsnSet::new(), &tree),
        "10.0.0.0/24/24-24;\n"
    );
}

#[test]
fn format_requires_a_template() {
    let built = request(Dialect::Format, ArtifactKind::PrefixList).build();
    assert!(built.is_err());
}

#[test]
fn capability_matrix() {
    assert_eq!(
        capabilities().len(),
        ArtifactKind::iter().count() * Dialect::iter().count()
    );
    let supported = |kind: ArtifactKind| -> Vec<Dialect> {
        Dialect::iter()
            .filter(|d| lookup(kind, *d).is_supported())
            .collect()
    };
    assert_eq!(supported(ArtifactKind::PrefixList).len(), 12);
    assert!(!supported(ArtifactKind::AsPath).contains(&Dialect::Mikrotik));
    assert!(supported(ArtifactKind::AsPath).contains(&Dialect::Json));
    assert!(!supported(ArtifactKind::OutputAsPath).contains(&Dialect::Json));
    assert_eq!(
        supported(ArtifactKind::AsSet),
        vec![Dialect::OpenBgpd, Dialect::Bird, Dialect::Json]
    );
    assert_eq!(
        supported(ArtifactKind::RouteFilterList),
        vec![Dialect::Juniper]
    );
    for dialect in [Dialect::CiscoXr, Dialect::Huawei, Dialect::Mikrotik] {
        assert!(matches!(
            lookup(ArtifactKind::ExtendedAcl, dialect),
            Capability::Unreachable
        ));
    }
}

#[test]
fn unsupported_pairs_write_nothing() {
    let asns = customers();
    let tree = no_prefixes();
    for entry in capabilities() {
        if entry.capability.is_supported() {
            continue;
        }
        let request = request(entry.dialect, entry.kind)
            .template("%n")
            .build()
            .unwrap();
        let mut out = Vec::new();
        let err = render(&request, &RenderInput::new(&asns, &tree), &mut out).unwrap_err();
        assert!(err.is_unsupported(), "{err}");
        assert!(out.is_empty());
    }
}

#[test]
fn mikrotik_as_path_error_names_the_pair() {
    let request = request(Dialect::Mikrotik, ArtifactKind::AsPath)
        .build()
        .unwrap();
    let mut out = Vec::new();
    let err = render(
        &request,
        &RenderInput::new(&customers(), &no_prefixes()),
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RenderError::Unsupported {
            kind: ArtifactKind::AsPath,
            dialect: Dialect::Mikrotik,
            ..
        }
    ));
}

#[test]
fn unknown_dialect() {
    assert!(matches!(
        Dialect::lookup("vyos"),
        Err(RenderError::UnknownDialect(name)) if name == "vyos"
    ));
}

/// An aggregate whose low bound equals the prefix length is an "upto" in
/// every dialect
#[test]
fn tie_break_across_dialects() {
    let prefix = Prefix::expect_from("10.0.0.0/16");
    let tree = RadixTree::from_entries(
        IpVer::V4,
        [Entry::new(prefix, LenMatch::classify(16, 16, 24))],
    )
    .unwrap();
    let expected = [
        (Dialect::Cisco, "ip prefix-list NN permit 10.0.0.0/16 le 24\n"),
        (Dialect::Arista, "    seq 1 permit 10.0.0.0/16 le 24\n"),
        (Dialect::CiscoXr, " 10.0.0.0/16 le 24\n"),
        (Dialect::Bird, "    10.0.0.0/16{16,24}\n"),
        (Dialect::NokiaMd, "    prefix 10.0.0.0/16 type through {\n"),
        (Dialect::Nokia, "    prefix 10.0.0.0/16 prefix-length-range 16-24\n"),
        (
            Dialect::Huawei,
            "ip ip-prefix NN permit 10.0.0.0 16 less-equal 24\n",
        ),
        (Dialect::OpenBgpd, "\t10.0.0.0/16 prefixlen 16 - 24\n"),
    ];
    for (dialect, line) in expected {
        let request = request(dialect, ArtifactKind::PrefixList).build().unwrap();
        let out = to_string(&request, &AsnSet::new(), &tree);
        assert!(out.contains(line), "{dialect}: {out}");
    }

    let request = request(Dialect::Juniper, ArtifactKind::RouteFilterList)
        .build()
        .unwrap();
    assert!(to_string(&request, &AsnSet::new(), &tree).contains("    10.0.0.0/16 upto /24;\n"));
}

#[test]
fn origin_clause_comes_first() {
    let asns: AsnSet = [65001, 65000, 65002].into_iter().collect();
    let request = request(Dialect::Juniper, ArtifactKind::AsPath)
        .name("AS-SELF")
        .asn(65000)
        .build()
        .unwrap();
    assert_eq!(
        to_string(&request, &asns, &no_prefixes()),
        "policy-options {\nreplace:\n as-path-group AS-SELF {\n  \
         as-path a0 \"^65000(65000)*$\";\n  \
         as-path a1 \"^65000(.)*(65001|65002)$\";\n }\n}\n"
    );
}

#[test]
fn empty_fallbacks() {
    let asns = AsnSet::new();
    let tree = no_prefixes();
    let cases = [
        (
            Dialect::Cisco,
            ArtifactKind::AsPath,
            "ip as-path access-list NN deny .*\n",
        ),
        (Dialect::Juniper, ArtifactKind::AsPath, "as-path aNone \"!.*\";"),
        (
            Dialect::Huawei,
            ArtifactKind::OutputAsPath,
            "ip as-path-filter NN deny .*\n",
        ),
        (Dialect::OpenBgpd, ArtifactKind::AsPath, "deny from AS 0\n"),
        (
            Dialect::Juniper,
            ArtifactKind::ExtendedAcl,
            "route-filter 0.0.0.0/0 orlonger reject;",
        ),
        (
            Dialect::Cisco,
            ArtifactKind::ExtendedAcl,
            "ip access-list extended NN deny any any\n",
        ),
        (
            Dialect::Cisco,
            ArtifactKind::PrefixList,
            "ip prefix-list NN deny 0.0.0.0/0\n",
        ),
    ];
    for (dialect, kind, fallback) in cases {
        let request = request(dialect, kind).build().unwrap();
        let out = to_string(&request, &asns, &tree);
        assert!(out.contains(fallback), "{dialect} {kind}: {out}");
    }
    let bird_request = request(Dialect::Bird, ArtifactKind::PrefixList)
        .build()
        .unwrap();
    assert_eq!(to_string(&bird_request, &asns, &tree), "");

    // these dialects have no deny fallback, an empty set leaves the bare group
    let envelopes = [
        (Dialect::CiscoXr, "as-path-set NN\nend-set\n"),
        (
            Dialect::Nokia,
            "configure router policy-options\nbegin\nno as-path-group \"NN\"\n\
             as-path-group \"NN\"\nexit\ncommit\n",
        ),
        (
            Dialect::NokiaMd,
            "/configure policy-options\ndelete as-path-group \"NN\"\n\
             as-path-group \"NN\" {\n}\n",
        ),
    ];
    for (dialect, envelope) in envelopes {
        let request = request(dialect, ArtifactKind::AsPath).build().unwrap();
        assert_eq!(to_string(&request, &asns, &tree), envelope, "{dialect}");
    }
}

#[test]
fn batching_covers_every_member() {
    bolero::check!()
        .with_type()
        .for_each(|(asns, width): &(Vec<u32>, u8)| {
            let width = usize::from(*width).max(1);
            let set: AsnSet = asns.iter().copied().filter(|a| *a != 65000).collect();
            let request = request(Dialect::Cisco, ArtifactKind::AsPath)
                .asn(65000)
                .aswidth(width)
                .build()
                .unwrap();
            let out = to_string(&request, &set, &no_prefixes());
            let clauses = out.lines().filter(|l| l.contains(" permit ")).count();
            assert_eq!(clauses, set.len().div_ceil(width));
            for asn in &set {
                assert!(out.contains(&format!("{asn}|")) || out.contains(&format!("{asn})")));
            }
        });
}

#[test]
fn concurrent_renders_match() {
    let asns: AsnSet = (64_000..66_000).collect();
    let tree = RadixTree::from_entries(
        IpVer::V4,
        (0..=255u8).map(|i| {
            Entry::new(
                Prefix::expect_from(format!("10.{i}.0.0/16").as_str()),
                LenMatch::UpTo { high: 24 },
            )
        }),
    )
    .unwrap();
    let requests: Vec<RenderRequest> = [
        (Dialect::Cisco, ArtifactKind::PrefixList),
        (Dialect::Juniper, ArtifactKind::AsPath),
        (Dialect::Json, ArtifactKind::AsSet),
        (Dialect::Nokia, ArtifactKind::ExtendedAcl),
    ]
    .into_iter()
    .map(|(dialect, kind)| request(dialect, kind).asn(65000).build().unwrap())
    .collect();

    let sequential: Vec<String> = requests
        .iter()
        .map(|r| to_string(r, &asns, &tree))
        .collect();
    let (shared_asns, shared_tree) = (&asns, &tree);
    let parallel: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = requests
            .iter()
            .map(|r| s.spawn(move || to_string(r, shared_asns, shared_tree)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}
