/*!

This is the long-form manual for `instant_runoff` and `irvtally`.

## Counting rules

The count is a single-winner instant-runoff:

1. Ballots are cleaned first. A candidate ranked several times on the same ballot only
   keeps its highest rank. Ballots with no preference left are dropped. If no ballot
   remains, there is no winner.
2. Every ballot counts for its highest-ranked candidate still in the race.
3. If only one candidate is left, it wins, even without any vote.
4. If a candidate has strictly more than half of the continuing votes, it wins.
   Ballots whose preferences have all been eliminated (exhausted ballots) are not
   continuing votes: the winning threshold can go down from one round to the next.
5. If all the candidates still in the race have the same number of votes, there is
   no winner.
6. Otherwise, *all* the candidates with the lowest number of votes are eliminated in
   the same round and their ballots move on to the next preference still in the race.

The number of rounds is bounded by the number of candidates (configurable). Reaching
that bound without a decision means that there is no winner.

### Undeclared candidates

When the candidates are declared, a ballot may still rank someone else first.
Two policies are available:

* `permissive` (default): such a candidate is admitted into the race. Undeclared
  candidates only ranked at lower positions are skipped.
* `strict`: undeclared candidates are removed from all the ballots before counting.

When no candidate is declared, the candidates are all the names found in the ballots.

## Election file

`irvtally` reads the election from a JSON file:

```text
{
  "outputSettings": { "contestName": "Board election" },
  "candidates": [ { "name": "Alice" }, { "name": "Bob" }, { "name": "Charlie" } ],
  "rules": { "candidateAdmission": "permissive", "maxRounds": "max" },
  "ballots": [ ["Alice", "Bob"], ["Bob"], ["Charlie", "Alice"] ]
}
```

- `outputSettings.contestName` (string, required), `contestDate`,
  `contestJurisdiction`, `contestOffice` (strings, optional): copied to the summary.
- `candidates` (optional): the declared candidates, in order. If missing, they are
  inferred from the ballots.
- `rules` (optional): `candidateAdmission` is `permissive` or `strict`,
  `maxRounds` is `max` (one round per candidate) or a positive number.
- `ballots`: each ballot is the list of its choices, first choice first. Choices are
  strings or integers. Integers are treated as the corresponding decimal string.

The `--strict` and `--max-rounds` flags override the rules of the file.

## Summary

The outcome is written as JSON, by default to the standard output (see `--out`):

```text
{
  "config": { "contest": "Board election", "threshold": "2", ... },
  "results": [
    { "round": 1,
      "tally": { "Alice": "1", "Bob": "1", "Charlie": "1" },
      "tallyResults": [ ... ] }
  ],
  "winner": null,
  "termination": "deadlock"
}
```

Each entry of `tallyResults` is either `{"eliminated": name, "transfers": {...}}` with the
number of ballots moved to each candidate (and `exhausted` for the ballots that had
no preference left), or `{"elected": name, "transfers": {}}`.

With `--reference`, the summary is compared with a previously saved one. Differences
are printed and the program fails.
 */
