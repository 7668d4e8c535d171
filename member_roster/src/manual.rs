/*!

This is the long-form manual for `member_roster` and `rosterpub`.

## Input

The roster is the response sheet of the member sign-up form, exported as CSV (or as an
Excel workbook). The first row holds the questions of the form:

| Position | Header |
|----------|--------|
| 0 | `Timestamp` |
| 1 | `First Name` |
| 2 | `Last Name` |
| 3 | `Phone Number (in xxx-xxx-xxxx format)` |
| 4 | `Phone Number Type` |
| 5 | `Preferred Email Address` |
| 6 | `Contact Preference` |
| 7 | `Target Committees (select at least one)` |

The two long headers are shortened to `Phone Number` and `Target Committees`. After that,
the business columns are looked up by name, so reordering the questions of the form does
not change the reports. Any further question is carried along as a passthrough column, and
the first of them is printed in the reports.

Only the first worksheet of a workbook is read. Numbers typed without dashes (phone numbers)
are printed without a fractional part, and date cells are printed like the timestamps of
the form, for example `1/5/2023 10:00:00`.

## Members

A member is identified by the preferred email address. When somebody fills the form
more than once, only the first answer is kept. The comparison is exact: `Ann@x.org` and
`ann@x.org` are two different members. Answers without an email address are all kept.

## Committees

The committees are fixed:

* `Target 1: HBCU for Life: A Call to Action`
* `Target 2: Women's Healthcare and Wellness`
* `Target 3: Building Your Economic Legacy`
* `Target 4: The Arts!`
* `Target 5: Global Impact`
* `Signature Program: #CAP (College Admissions Process)`

The target committees answer is a multiple choice, exported as the selected labels joined
together. A member belongs to a committee when the label appears, verbatim, in the answer.
A member can belong to several committees, or to none.

## Reports

Seven reports are produced, each as `.csv` and `.html`: `members` for everyone, then one
per committee, named after the committee label with everything but letters and digits
removed (`Target1HBCUforLifeACalltoAction`, ...).

Rows are sorted by last name. The first, unlabeled column is the position of the answer
in the response sheet (starting at 0), which makes it easy to find the original answer.

```text
,First Name,Last Name,Phone Number,Phone Number Type,Preferred Email Address,Contact Preference,Target Committees
4,Ann,Adams,555-555-0101,Mobile,ann@x.org,Email,Target 4: The Arts!
0,Bob,Brown,555-555-0102,Home,bob@x.org,Phone,
```

A committee nobody signed up for still gets its reports, with the header row only.

*/
